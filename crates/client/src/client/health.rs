//! Liveness and greeting endpoints.

use serde::{Deserialize, Serialize};

use super::StorefrontClient;
use crate::error::Result;

/// `{"message": ...}` reply from `/` and `/hello/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

/// Reply from `/calc/add/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sum {
    pub a: i64,
    pub b: i64,
    pub result: i64,
}

impl StorefrontClient {
    /// Check the liveness probe. Returns the HTTP status code.
    pub async fn livez(&self) -> Result<u16> {
        let response = self.client.get(self.url("/livez")).send().await?;
        Ok(response.status().as_u16())
    }

    /// Check the readiness probe. 503 means storage is unreachable.
    pub async fn readyz(&self) -> Result<u16> {
        let response = self.client.get(self.url("/readyz")).send().await?;
        Ok(response.status().as_u16())
    }

    pub async fn index(&self) -> Result<Greeting> {
        let response = self.client.get(self.url("/")).send().await?;
        self.handle_response(response).await
    }

    /// Greets `name`, or lets the server pick its default.
    pub async fn hello(&self, name: Option<&str>) -> Result<Greeting> {
        let mut request = self.client.get(self.url("/hello/"));
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }
        self.handle_response(request.send().await?).await
    }

    pub async fn add(&self, a: i64, b: i64) -> Result<Sum> {
        let response = self
            .client
            .post(self.url("/calc/add/"))
            .query(&[("a", a), ("b", b)])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
