//! Demo auth operations.
//!
//! Every scheme the server demonstrates has a call here. Cookie sessions are
//! carried explicitly: `login_cookie` returns the session ID and the other
//! cookie calls take it back.

use reqwest::header::{COOKIE, SET_COOKIE};
use serde::{Deserialize, Serialize};

use super::StorefrontClient;
use crate::error::{ClientError, Result};

/// Header carrying the static token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "web-app-session-id";

/// Body shared by the demo auth responses. Fields a route does not send stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthReply {
    pub message: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_at: Option<i64>,
}

/// A cookie session started by `login_cookie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub cookie_name: String,
    pub session_id: String,
}

/// Finds `name`'s value among `Set-Cookie` header values.
pub fn session_from_set_cookie<'a>(
    values: impl IntoIterator<Item = &'a str>,
    name: &str,
) -> Option<String> {
    values.into_iter().find_map(|value| {
        let pair = value.split(';').next()?.trim();
        let (key, val) = pair.split_once('=')?;
        (key == name && !val.is_empty()).then(|| val.to_string())
    })
}

impl StorefrontClient {
    /// Echo the given Basic credentials.
    pub async fn basic_auth(&self, username: &str, password: &str) -> Result<AuthReply> {
        let response = self
            .client
            .get(self.api_url("/demo-auth/basic-auth/"))
            .basic_auth(username, Some(password))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Check Basic credentials against the server's table.
    pub async fn basic_auth_username(&self, username: &str, password: &str) -> Result<AuthReply> {
        let response = self
            .client
            .get(self.api_url("/demo-auth/basic-auth-username/"))
            .basic_auth(username, Some(password))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Resolve a static token to its user.
    pub async fn header_auth(&self, token: &str) -> Result<AuthReply> {
        let response = self
            .client
            .get(self.api_url("/demo-auth/some-http-header-auth/"))
            .header(TOKEN_HEADER, token)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Start a cookie session with a static token.
    pub async fn login_cookie(&self, token: &str, cookie_name: &str) -> Result<Session> {
        let response = self
            .client
            .post(self.api_url("/demo-auth/login-cookie/"))
            .header(TOKEN_HEADER, token)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let values = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok());
        let session_id = session_from_set_cookie(values, cookie_name).ok_or_else(|| {
            ClientError::InvalidResponse(format!("no {cookie_name} cookie in login response"))
        })?;

        Ok(Session {
            cookie_name: cookie_name.to_string(),
            session_id,
        })
    }

    /// Show the session behind a cookie.
    pub async fn check_cookie(&self, session: &Session) -> Result<AuthReply> {
        let response = self
            .client
            .get(self.api_url("/demo-auth/check-cookie/"))
            .header(COOKIE, format!("{}={}", session.cookie_name, session.session_id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// End the session behind a cookie.
    pub async fn logout_cookie(&self, session: &Session) -> Result<AuthReply> {
        let response = self
            .client
            .get(self.api_url("/demo-auth/logout-cookie/"))
            .header(COOKIE, format!("{}={}", session.cookie_name, session.session_id))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
