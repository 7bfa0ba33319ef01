use async_trait::async_trait;
use serde::Serialize;

use training_core::model::{Identity, UserId};

use crate::error::ApiError;
use crate::gateway::{NewUser, UserGateway, UserRecord, UserUpdate};
use crate::rest::client::ApiClient;

#[derive(Serialize)]
struct PageQuery {
    skip: usize,
    limit: usize,
}

#[derive(Serialize)]
struct PasswordChange<'a> {
    new_password: &'a str,
}

#[async_trait]
impl UserGateway for ApiClient {
    async fn list_users(&self, skip: usize, limit: usize) -> Result<Vec<Identity>, ApiError> {
        let records: Vec<UserRecord> = self
            .get_json_query("users", &PageQuery { skip, limit })
            .await?;
        records
            .into_iter()
            .map(UserRecord::into_identity)
            .collect()
    }

    async fn get_user(&self, id: UserId) -> Result<Identity, ApiError> {
        let record: UserRecord = self.get_json(&format!("users/{id}")).await?;
        record.into_identity()
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<Identity, ApiError> {
        let record: UserRecord = self.post_json("users", new_user).await?;
        record.into_identity()
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<Identity, ApiError> {
        let record: UserRecord = self.put_json(&format!("users/{id}"), update).await?;
        record.into_identity()
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.delete(&format!("users/{id}")).await
    }

    async fn change_password(&self, id: UserId, new_password: &str) -> Result<(), ApiError> {
        self.put_json_unit(
            &format!("users/{id}/password"),
            &PasswordChange { new_password },
        )
        .await
    }
}
