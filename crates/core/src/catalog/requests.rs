//! API request types for product operations.
//!
//! These types are shared between the server and client for type-safe API communication.

use serde::{Deserialize, Serialize};

use super::types::{NewProduct, Product};
use crate::serde::deserialize_present;

/// Request payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl CreateProductRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct::new(self.name, self.description, self.price)
    }
}

/// Request payload for a full product replacement (PUT).
///
/// Every field is required; a body missing any of them fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl UpdateProductRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Overwrite every field of the product.
    pub fn apply_to(self, product: &mut Product) {
        product.name = self.name;
        product.description = self.description;
        product.price = self.price;
    }
}

/// Request payload for a partial product update (PATCH).
///
/// Omitted fields are left untouched. Empty strings and zero are values like
/// any other and are applied. An explicit `null` is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchProductRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<i64>,
}

impl PatchProductRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Some(price);
        self
    }

    /// Returns true when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }

    /// Overwrite only the supplied fields.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> Product {
        Product {
            id: 1,
            name: "Mouse".to_string(),
            description: "Gaming mouse".to_string(),
            price: 100,
        }
    }

    #[test]
    fn test_update_request_requires_every_field() {
        let json = r#"{"name": "Mouse", "price": 100}"#;
        let result: Result<UpdateProductRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_overwrites_all_fields() {
        let mut product = mouse();
        UpdateProductRequest::new("Keyboard", "", 0).apply_to(&mut product);

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Keyboard");
        assert_eq!(product.description, "");
        assert_eq!(product.price, 0);
    }

    #[test]
    fn test_patch_request_empty_body_changes_nothing() {
        let patch: PatchProductRequest = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let mut product = mouse();
        patch.apply_to(&mut product);
        assert_eq!(product, mouse());
    }

    #[test]
    fn test_patch_request_applies_only_present_fields() {
        let patch: PatchProductRequest = serde_json::from_str(r#"{"price": 120}"#).unwrap();

        let mut product = mouse();
        patch.apply_to(&mut product);
        assert_eq!(product.name, "Mouse");
        assert_eq!(product.description, "Gaming mouse");
        assert_eq!(product.price, 120);
    }

    #[test]
    fn test_patch_request_applies_empty_string_and_zero() {
        let patch: PatchProductRequest =
            serde_json::from_str(r#"{"description": "", "price": 0}"#).unwrap();

        let mut product = mouse();
        patch.apply_to(&mut product);
        assert_eq!(product.description, "");
        assert_eq!(product.price, 0);
    }

    #[test]
    fn test_patch_request_rejects_null() {
        let result: Result<PatchProductRequest, _> = serde_json::from_str(r#"{"name": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_request_serialization_skips_missing() {
        let patch = PatchProductRequest::new().with_name("Display");
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"name":"Display"}"#);
    }
}
