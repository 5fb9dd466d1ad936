//! Status code mapping for domain and repository errors.
//!
//! Handlers turn errors into responses through these functions, so the
//! mapping lives in one place and can be tested without a server.

use super::RepositoryError;
use crate::catalog::ProductError;
use crate::orders::OrderError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404
/// - `AlreadyExists` -> 409
/// - `InvalidData` -> 400
/// - `ConnectionFailed` -> 503
/// - `QueryFailed`, `Serialization` -> 500
///
/// ```
/// use storefront_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("Product", 7);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
    }
}

/// Product validation failures are unprocessable input.
pub fn product_error_to_status_code(_error: &ProductError) -> u16 {
    422
}

/// Order line failures are bad requests.
pub fn order_error_to_status_code(_error: &OrderError) -> u16 {
    400
}
