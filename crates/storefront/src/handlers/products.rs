//! Product CRUD handlers.
//!
//! These handlers use repository trait objects for database access.
//! Validation runs in the core before anything is written.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use storefront_core::catalog::{
    update_product as apply_change, validate_product, CreateProductRequest, PatchProductRequest,
    Product, ProductChange, UpdateProductRequest,
};
use storefront_core::orders::ProductWithOrders;
use storefront_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

async fn require_product(state: &AppState, id: i64) -> Result<Product, AppError> {
    state
        .products
        .get_product(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Product", id).into())
}

/// Applies a full or partial change to a stored product.
async fn change_product(
    state: &AppState,
    id: i64,
    change: ProductChange,
) -> Result<Json<Product>, AppError> {
    let existing = require_product(state, id).await?;
    let updated = apply_change(&existing, change)?;
    let saved = state.products.update_product(&updated).await?;

    tracing::info!(product_id = id, "Updated product");
    Ok(Json(saved))
}

/// List all products (GET /products/).
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.list_products().await?))
}

/// Create a new product (POST /products/).
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_product = payload.into_new_product();
    validate_product(&new_product.name, new_product.price)?;

    let product = state.products.create_product(&new_product).await?;

    tracing::info!(product_id = product.id, name = %product.name, "Created new product");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a single product by ID (GET /products/{id}/).
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(require_product(&state, id).await?))
}

/// Replace every field of a product (PUT /products/{id}/).
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    change_product(&state, id, payload.into()).await
}

/// Overwrite only the fields present in the body (PATCH /products/{id}/).
pub async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PatchProductRequest>,
) -> Result<Json<Product>, AppError> {
    if payload.is_empty() {
        tracing::debug!(product_id = id, "Empty patch, nothing to change");
        return get_product(State(state), Path(id)).await;
    }
    change_product(&state, id, payload.into()).await
}

/// Delete a product by ID (DELETE /products/{id}/).
///
/// Its order lines go with it.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.products.delete_product(id).await?;

    tracing::info!(product_id = id, "Deleted product and its order lines");

    Ok(StatusCode::NO_CONTENT)
}

/// A product with every order it appears on (GET /products/{id}/orders/).
pub async fn product_orders(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductWithOrders>, AppError> {
    state
        .orders
        .get_product_with_orders(id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::not_found("Product", id).into())
}
