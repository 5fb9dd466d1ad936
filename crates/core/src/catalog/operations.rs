use super::error::ProductError;
use super::requests::{PatchProductRequest, UpdateProductRequest};
use super::types::Product;

/// A requested change to a stored product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductChange {
    /// Replace every field (PUT).
    Full(UpdateProductRequest),
    /// Overwrite only the supplied fields (PATCH).
    Partial(PatchProductRequest),
}

impl From<UpdateProductRequest> for ProductChange {
    fn from(request: UpdateProductRequest) -> Self {
        ProductChange::Full(request)
    }
}

impl From<PatchProductRequest> for ProductChange {
    fn from(request: PatchProductRequest) -> Self {
        ProductChange::Partial(request)
    }
}

/// Applies a change to an existing product and validates the result.
///
/// The ID never changes. The returned product is what should be persisted.
pub fn update_product(existing: &Product, change: ProductChange) -> Result<Product, ProductError> {
    let mut updated = existing.clone();
    match change {
        ProductChange::Full(request) => request.apply_to(&mut updated),
        ProductChange::Partial(request) => request.apply_to(&mut updated),
    }
    validate_product(&updated.name, updated.price)?;
    Ok(updated)
}

/// Validates product fields before creation or update.
pub fn validate_product(name: &str, price: i64) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    if name.chars().count() > 100 {
        return Err(ProductError::NameTooLong);
    }
    if price < 0 {
        return Err(ProductError::NegativePrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> Product {
        Product {
            id: 7,
            name: "Keyboard".to_string(),
            description: "Mechanical".to_string(),
            price: 149,
        }
    }

    #[test]
    fn test_update_product_full_replaces_fields() {
        let change = UpdateProductRequest::new("Display", "4K", 299).into();
        let updated = update_product(&keyboard(), change).unwrap();

        assert_eq!(updated.id, 7);
        assert_eq!(updated.name, "Display");
        assert_eq!(updated.description, "4K");
        assert_eq!(updated.price, 299);
    }

    #[test]
    fn test_update_product_partial_keeps_missing_fields() {
        let change = PatchProductRequest::new().with_description("Wireless").into();
        let updated = update_product(&keyboard(), change).unwrap();

        assert_eq!(updated.name, "Keyboard");
        assert_eq!(updated.description, "Wireless");
        assert_eq!(updated.price, 149);
    }

    #[test]
    fn test_update_product_empty_patch_is_identity() {
        let updated = update_product(&keyboard(), PatchProductRequest::new().into()).unwrap();
        assert_eq!(updated, keyboard());
    }

    #[test]
    fn test_update_product_rejects_blank_name() {
        let change = PatchProductRequest::new().with_name("  ").into();
        assert_eq!(
            update_product(&keyboard(), change),
            Err(ProductError::EmptyName)
        );
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product("Gift", 0).is_ok());
        assert_eq!(validate_product("", 10), Err(ProductError::EmptyName));
        assert_eq!(
            validate_product(&"x".repeat(101), 10),
            Err(ProductError::NameTooLong)
        );
        assert_eq!(
            validate_product("Mouse", -1),
            Err(ProductError::NegativePrice(-1))
        );
    }
}
