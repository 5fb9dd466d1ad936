//! HTTP client for the storefront API.

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Default mount point of the versioned API.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: reqwest::Client,
    base_url: String,
    api_prefix: String,
}

impl StorefrontClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }

    /// Create from environment (STOREFRONT_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STOREFRONT_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        Self::new(base_url)
    }

    /// Use a different API prefix than `/api/v1`.
    pub fn with_api_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.api_prefix = format!("/{}", prefix.as_ref().trim_matches('/'));
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint outside the API prefix.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a URL for an endpoint under the API prefix.
    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    /// Pulls the server's `detail` message out of an error body.
    async fn error_message(response: reqwest::Response) -> String {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail)
            .unwrap_or(text)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = Self::error_message(response).await;
        Err(ClientError::from_status(status.as_u16(), message))
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(ClientError::from)
    }

    /// Handle delete responses (no body expected).
    async fn handle_delete_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = StorefrontClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/livez"), "http://localhost:8000/livez");
        assert_eq!(
            client.api_url("/products/"),
            "http://localhost:8000/api/v1/products/"
        );
    }

    #[test]
    fn test_custom_api_prefix() {
        let client = StorefrontClient::new("http://shop").with_api_prefix("api/v2/");
        assert_eq!(client.api_url("/orders/"), "http://shop/api/v2/orders/");
    }
}
