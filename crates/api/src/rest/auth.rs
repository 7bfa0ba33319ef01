use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiError;
use crate::gateway::{AuthGateway, LoginResponse};
use crate::rest::client::ApiClient;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest { username, password };
        self.post_json("auth/login", &request).await
    }
}
