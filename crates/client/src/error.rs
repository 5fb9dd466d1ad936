//! Client error types.

use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to a storefront server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 404, with the server's `detail` message.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 401 from one of the demo-auth schemes.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// 400 or 422: the server refused the input.
    #[error("Rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// 409 on a duplicate row.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Classifies a non-success status and its `detail` message.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => Self::NotFound(message),
            401 => Self::Unauthorized(message),
            409 => Self::Conflict(message),
            400 | 422 => Self::Rejected { status, message },
            _ => Self::ServerError { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies_client_errors() {
        assert!(matches!(
            ClientError::from_status(404, "Product not found: 7".into()),
            ClientError::NotFound(m) if m == "Product not found: 7"
        ));
        assert!(matches!(
            ClientError::from_status(422, "price".into()),
            ClientError::Rejected { status: 422, .. }
        ));
        assert!(matches!(
            ClientError::from_status(409, "dup".into()),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            ClientError::from_status(503, "down".into()),
            ClientError::ServerError { status: 503, .. }
        ));
    }
}
