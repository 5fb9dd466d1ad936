use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// `price` is stored in minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl Product {
    /// Builds a persisted product from its assigned ID and field values.
    pub fn from_new(id: i64, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
        }
    }
}

/// Field values for a product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}
