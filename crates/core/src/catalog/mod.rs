mod error;
mod operations;
mod requests;
mod types;

pub use error::ProductError;
pub use operations::{update_product, validate_product, ProductChange};
pub use requests::{CreateProductRequest, PatchProductRequest, UpdateProductRequest};
pub use types::{NewProduct, Product};
