use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Auth errors for the storefront_auth crate.
///
/// Wraps the core `AuthError` and adds the failures that only exist around I/O.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (credential checks, session storage).
    #[error(transparent)]
    Core(#[from] storefront_core::auth::AuthError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// Whether the response should carry a `WWW-Authenticate: Basic` challenge.
    fn is_basic_challenge(&self) -> bool {
        use storefront_core::auth::AuthError as CoreError;

        matches!(
            self,
            AuthError::Core(
                CoreError::MissingCredentials
                    | CoreError::MalformedCredentials(_)
                    | CoreError::InvalidCredentials
            )
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        use storefront_core::auth::AuthError as CoreError;

        let (status, detail) = match &self {
            AuthError::Core(core_err) => match core_err {
                CoreError::MissingCredentials
                | CoreError::InvalidCredentials
                | CoreError::InvalidToken
                | CoreError::NotAuthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
                CoreError::MalformedCredentials(_) => (
                    StatusCode::UNAUTHORIZED,
                    "Invalid authentication credentials".to_string(),
                ),
                CoreError::Storage(_) => {
                    tracing::error!("Session storage error: {}", self);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            AuthError::Config(_) => {
                tracing::error!("Config error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if self.is_basic_challenge() {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}
