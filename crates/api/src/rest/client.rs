//! Shared HTTP plumbing for the REST gateways.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use url::Url;

use crate::error::ApiError;

/// Default backend base, matching the development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Where the client talks to.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Parses a base url. A trailing slash is appended so endpoint joins
    /// stay inside the api prefix.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Serialization` for an unparseable url.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/"))
            .map_err(|e| ApiError::Serialization(format!("invalid base url: {e}")))?;
        Ok(Self { base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Typed wrapper around `reqwest::Client`.
///
/// Holds the bearer token in a shared slot so the session layer can swap it
/// on login/logout without rebuilding the gateways that clone this client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Swaps the bearer token used on subsequent requests. `None` reverts
    /// to anonymous requests.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    fn current_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Serialization(format!("invalid endpoint {path:?}: {e}")))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn dispatch(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.authorize(builder).send().await?;
        check_status(response).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.dispatch(self.http.get(url)).await?;
        decode(response).await
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.dispatch(self.http.get(url).query(query)).await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let response = self.dispatch(self.http.post(url).json(body)).await?;
        decode(response).await
    }

    pub(crate) async fn post_json_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        self.dispatch(self.http.post(url).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "PUT");
        let response = self.dispatch(self.http.put(url).json(body)).await?;
        decode(response).await
    }

    pub(crate) async fn put_json_unit<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "PUT");
        self.dispatch(self.http.put(url).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "DELETE");
        self.dispatch(self.http.delete(url)).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Serialization(e.to_string()))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Rejected {
                status: status.as_u16(),
                detail: extract_detail(&body),
            })
        }
    }
}

/// Pulls the server's `{"detail": ...}` message out of an error body,
/// falling back to the raw body, then to a generic message.
fn extract_detail(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str().map(str::to_owned))
        });
    from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "request failed".to_owned()
        } else {
            trimmed.to_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_detail_prefers_the_detail_field() {
        assert_eq!(
            extract_detail(r#"{"detail": "user already assigned"}"#),
            "user already assigned"
        );
    }

    #[test]
    fn extract_detail_falls_back_to_raw_body() {
        assert_eq!(extract_detail("plain failure"), "plain failure");
        assert_eq!(extract_detail("   "), "request failed");
        assert_eq!(extract_detail(r#"{"error": "other shape"}"#), r#"{"error": "other shape"}"#);
    }

    #[test]
    fn endpoints_join_under_the_api_prefix() {
        let config = ApiConfig::new("http://127.0.0.1:8000/api/v1").unwrap();
        let client = ApiClient::new(config);
        let url = client.endpoint("users/5").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/users/5");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let a = ApiConfig::new("http://host/api/v1").unwrap();
        let b = ApiConfig::new("http://host/api/v1/").unwrap();
        assert_eq!(a.base_url(), b.base_url());
    }

    #[test]
    fn default_base_url_parses() {
        let config = ApiConfig::new(DEFAULT_BASE_URL).unwrap();
        assert!(config.base_url().as_str().starts_with(DEFAULT_BASE_URL));
    }
}
