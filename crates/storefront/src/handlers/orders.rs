//! Order handlers.
//!
//! Orders are listed and fetched as full graphs: each line carries its
//! product, count and recorded unit price.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use storefront_core::orders::{
    AddLineRequest, CreateOrderRequest, OrderProductAssociation, OrderWithLines,
};
use storefront_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List every order with its lines (GET /orders/).
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderWithLines>>, AppError> {
    Ok(Json(state.orders.get_orders_with_products().await?))
}

/// Create an empty order (POST /orders/).
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .orders
        .create_order(&payload.into_new_order())
        .await?;

    tracing::info!(order_id = order.id, promocode = ?order.promocode, "Created new order");

    Ok((StatusCode::CREATED, Json(order)))
}

/// Get one order with its lines (GET /orders/{id}/).
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderWithLines>, AppError> {
    state
        .orders
        .get_order_with_lines(id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::not_found("Order", id).into())
}

/// Delete an order and its lines (DELETE /orders/{id}/).
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.orders.delete_order(id).await?;

    tracing::info!(order_id = id, "Deleted order and its lines");

    Ok(StatusCode::NO_CONTENT)
}

/// Add a product to an order, or bump its count (POST /orders/{id}/products/).
pub async fn add_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AddLineRequest>,
) -> Result<Json<OrderProductAssociation>, AppError> {
    let line = state
        .orders
        .add_or_increment_line(id, payload.product_id, payload.count)
        .await?;

    tracing::info!(
        order_id = id,
        product_id = payload.product_id,
        count = line.count,
        "Recorded order line"
    );

    Ok(Json(line))
}
