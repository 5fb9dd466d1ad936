use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingCredentials,

    #[error("Invalid authorization header: {0}")]
    MalformedCredentials(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Token invalid")]
    InvalidToken,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("storage error: {0}")]
    Storage(String),
}
