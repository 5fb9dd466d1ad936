use thiserror::Error;

use crate::catalog::ProductError;
use crate::orders::OrderError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity_type: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.to_string(),
        }
    }
}

impl From<OrderError> for RepositoryError {
    fn from(error: OrderError) -> Self {
        Self::InvalidData(error.to_string())
    }
}

impl From<ProductError> for RepositoryError {
    fn from(error: ProductError) -> Self {
        Self::InvalidData(error.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Product",
            id: "42".to_string(),
        };
        assert_eq!(error.to_string(), "Product not found: 42");
        assert_eq!(RepositoryError::not_found("Product", 42), error);
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::already_exists("User", "sam");
        assert_eq!(error.to_string(), "User already exists: sam");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("no such table: products".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: products");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("missing required field".to_string());
        assert_eq!(
            error.to_string(),
            "Serialization error: missing required field"
        );
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("unknown product".to_string());
        assert_eq!(error.to_string(), "Invalid data: unknown product");
    }

    #[test]
    fn test_order_error_converts_to_invalid_data() {
        let error: RepositoryError = OrderError::InvalidQuantity(0).into();
        assert_eq!(
            error,
            RepositoryError::InvalidData("Quantity must be at least 1, got 0".to_string())
        );
    }
}
