//! API request types for order operations.

use serde::{Deserialize, Serialize};

use super::types::NewOrder;
use crate::serde::deserialize_optional_string;

/// Request payload for creating an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub promocode: Option<String>,
}

impl CreateOrderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_promocode(mut self, promocode: impl Into<String>) -> Self {
        self.promocode = Some(promocode.into());
        self
    }

    pub fn into_new_order(self) -> NewOrder {
        let order = NewOrder::new();
        match self.promocode {
            Some(code) => order.with_promocode(code),
            None => order,
        }
    }
}

/// Request payload for adding a product to an order.
///
/// When the product is already on the order its count is incremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLineRequest {
    pub product_id: i64,
    #[serde(default = "default_count")]
    pub count: i64,
}

fn default_count() -> i64 {
    1
}

impl AddLineRequest {
    pub fn new(product_id: i64) -> Self {
        Self {
            product_id,
            count: default_count(),
        }
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_request_defaults_count_to_one() {
        let request: AddLineRequest = serde_json::from_str(r#"{"product_id": 3}"#).unwrap();
        assert_eq!(request, AddLineRequest::new(3));
        assert_eq!(request.count, 1);
    }

    #[test]
    fn test_create_order_request_blank_promocode_is_none() {
        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"promocode": "  "}"#).unwrap();
        assert_eq!(request.promocode, None);

        let order = CreateOrderRequest::new()
            .with_promocode("promo")
            .into_new_order();
        assert_eq!(order.promocode.as_deref(), Some("promo"));
    }
}
