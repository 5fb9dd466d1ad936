use thiserror::Error;

/// Errors that can occur when changing order lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
    #[error("Quantity overflow for order {order_id} and product {product_id}")]
    QuantityOverflow { order_id: i64, product_id: i64 },
    #[error("Total overflow for order {order_id}")]
    TotalOverflow { order_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_display() {
        assert_eq!(
            OrderError::InvalidQuantity(0).to_string(),
            "Quantity must be at least 1, got 0"
        );
        assert_eq!(
            OrderError::QuantityOverflow {
                order_id: 1,
                product_id: 2
            }
            .to_string(),
            "Quantity overflow for order 1 and product 2"
        );
        assert_eq!(
            OrderError::TotalOverflow { order_id: 4 }.to_string(),
            "Total overflow for order 4"
        );
    }
}
