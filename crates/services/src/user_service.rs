//! User administration.

use std::sync::Arc;

use training_api::gateway::{NewUser, UserGateway, UserUpdate};
use training_core::model::{Identity, Role, UserId};

use crate::error::UserServiceError;

/// Page size for the user list.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Orchestrates account administration.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserGateway>,
}

impl UserService {
    #[must_use]
    pub fn new(users: Arc<dyn UserGateway>) -> Self {
        Self { users }
    }

    /// One page of accounts.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Api` if the fetch fails.
    pub async fn list_users(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Identity>, UserServiceError> {
        Ok(self.users.list_users(skip, limit).await?)
    }

    /// Every account, paged through until a short page.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Api` if any page fetch fails.
    pub async fn list_all_users(&self) -> Result<Vec<Identity>, UserServiceError> {
        let mut all = Vec::new();
        let mut skip = 0;
        loop {
            let page = self.users.list_users(skip, DEFAULT_PAGE_SIZE).await?;
            let page_len = page.len();
            all.extend(page);
            if page_len < DEFAULT_PAGE_SIZE {
                return Ok(all);
            }
            skip += DEFAULT_PAGE_SIZE;
        }
    }

    /// One account by id.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Api` if missing or the fetch fails.
    pub async fn get_user(&self, id: UserId) -> Result<Identity, UserServiceError> {
        Ok(self.users.get_user(id).await?)
    }

    /// Creates an account after checking the form fields.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Validation` for blank username, password
    /// or name; `UserServiceError::Api` if the server refuses.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        email: Option<String>,
        role: Role,
    ) -> Result<Identity, UserServiceError> {
        if username.trim().is_empty() {
            return Err(UserServiceError::Validation("username is required".into()));
        }
        if password.is_empty() {
            return Err(UserServiceError::Validation("password is required".into()));
        }
        if first_name.trim().is_empty() && last_name.trim().is_empty() {
            return Err(UserServiceError::Validation("a name is required".into()));
        }
        let request = NewUser::new(
            username.trim(),
            password,
            first_name.trim(),
            last_name.trim(),
            email,
            role,
        );
        Ok(self.users.create_user(&request).await?)
    }

    /// Applies a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Api` if missing or the update fails.
    pub async fn update_user(
        &self,
        id: UserId,
        update: &UserUpdate,
    ) -> Result<Identity, UserServiceError> {
        Ok(self.users.update_user(id, update).await?)
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Api` if missing or the delete fails.
    pub async fn delete_user(&self, id: UserId) -> Result<(), UserServiceError> {
        Ok(self.users.delete_user(id).await?)
    }

    /// Sets a new password.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Validation` for an empty password,
    /// `UserServiceError::Api` if the change fails.
    pub async fn change_password(
        &self,
        id: UserId,
        new_password: &str,
    ) -> Result<(), UserServiceError> {
        if new_password.is_empty() {
            return Err(UserServiceError::Validation("password is required".into()));
        }
        Ok(self.users.change_password(id, new_password).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use training_api::InMemoryGateway;

    #[tokio::test]
    async fn create_user_validates_before_dispatch() {
        let service = UserService::new(Arc::new(InMemoryGateway::new()));

        let err = service
            .create_user("", "pw", "Ana", "Lopez", None, Role::Client)
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::Validation(_)));

        let err = service
            .create_user("alopez", "", "Ana", "Lopez", None, Role::Client)
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::Validation(_)));

        let err = service
            .create_user("alopez", "pw", " ", "", None, Role::Client)
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let service = UserService::new(Arc::new(InMemoryGateway::new()));

        let created = service
            .create_user("alopez", "pw", "Ana", "Lopez", None, Role::Instructor)
            .await
            .unwrap();
        assert_eq!(created.role(), Role::Instructor);

        let listed = service.list_all_users().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].username(), "alopez");
    }

    #[tokio::test]
    async fn duplicate_username_is_an_api_rejection() {
        let service = UserService::new(Arc::new(InMemoryGateway::new()));
        service
            .create_user("alopez", "pw", "Ana", "Lopez", None, Role::Client)
            .await
            .unwrap();

        let err = service
            .create_user("alopez", "pw2", "Another", "Lopez", None, Role::Client)
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::Api(_)));
    }
}
