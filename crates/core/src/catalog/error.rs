use thiserror::Error;

/// Errors that can occur when validating a product.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Product name too long (max 100 characters)")]
    NameTooLong,
    #[error("Product price cannot be negative: {0}")]
    NegativePrice(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_error_display() {
        assert_eq!(
            ProductError::EmptyName.to_string(),
            "Product name cannot be empty"
        );
        assert_eq!(
            ProductError::NegativePrice(-5).to_string(),
            "Product price cannot be negative: -5"
        );
    }
}
