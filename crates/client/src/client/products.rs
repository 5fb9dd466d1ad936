//! Product API operations.

use storefront_core::catalog::{
    CreateProductRequest, PatchProductRequest, Product, UpdateProductRequest,
};
use storefront_core::orders::ProductWithOrders;

use super::StorefrontClient;
use crate::error::Result;

impl StorefrontClient {
    /// List all products.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let response = self.client.get(self.api_url("/products/")).send().await?;
        self.handle_response(response).await
    }

    /// Create a new product.
    pub async fn create_product(&self, req: &CreateProductRequest) -> Result<Product> {
        let response = self
            .client
            .post(self.api_url("/products/"))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get product by ID.
    pub async fn get_product(&self, id: i64) -> Result<Product> {
        let response = self
            .client
            .get(self.api_url(&format!("/products/{id}/")))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Replace every field of a product.
    pub async fn update_product(&self, id: i64, req: &UpdateProductRequest) -> Result<Product> {
        let response = self
            .client
            .put(self.api_url(&format!("/products/{id}/")))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Overwrite only the fields set in `req`.
    pub async fn patch_product(&self, id: i64, req: &PatchProductRequest) -> Result<Product> {
        let response = self
            .client
            .patch(self.api_url(&format!("/products/{id}/")))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete product by ID.
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.api_url(&format!("/products/{id}/")))
            .send()
            .await?;
        self.handle_delete_response(response).await
    }

    /// Get a product with every order it appears on.
    pub async fn product_orders(&self, id: i64) -> Result<ProductWithOrders> {
        let response = self
            .client
            .get(self.api_url(&format!("/products/{id}/orders/")))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
