//! Order API operations.

use storefront_core::orders::{
    AddLineRequest, CreateOrderRequest, Order, OrderProductAssociation, OrderWithLines,
};

use super::StorefrontClient;
use crate::error::Result;

impl StorefrontClient {
    /// List all orders with their lines.
    pub async fn list_orders(&self) -> Result<Vec<OrderWithLines>> {
        let response = self.client.get(self.api_url("/orders/")).send().await?;
        self.handle_response(response).await
    }

    /// Create a new order.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order> {
        let response = self
            .client
            .post(self.api_url("/orders/"))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get an order with its lines.
    pub async fn get_order(&self, id: i64) -> Result<OrderWithLines> {
        let response = self
            .client
            .get(self.api_url(&format!("/orders/{id}/")))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete order by ID.
    pub async fn delete_order(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.api_url(&format!("/orders/{id}/")))
            .send()
            .await?;
        self.handle_delete_response(response).await
    }

    /// Add a product to an order, or increase its count.
    pub async fn add_product_to_order(
        &self,
        order_id: i64,
        req: &AddLineRequest,
    ) -> Result<OrderProductAssociation> {
        let response = self
            .client
            .post(self.api_url(&format!("/orders/{order_id}/products/")))
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
