use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use storefront_auth::demo_auth_routes;

use crate::{
    handlers::{
        health::{livez, readyz},
        orders::{add_product, create_order, delete_order, get_order, list_orders},
        products::{
            create_product, delete_product, get_product, list_products, patch_product,
            product_orders, update_product,
        },
        root::{add, hello, index},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-auth-token"),
        ]);

    // Versioned API routes with CORS
    let api_routes = Router::new()
        // Product routes
        .route("/products/", get(list_products).post(create_product))
        .route(
            "/products/{id}/",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .route("/products/{id}/orders/", get(product_orders))
        // Order routes
        .route("/orders/", get(list_orders).post(create_order))
        .route("/orders/{id}/", get(get_order).delete(delete_order))
        .route("/orders/{id}/products/", post(add_product))
        // Demo auth routes run on their own state
        .merge(demo_auth_routes().with_state(state.auth.clone()))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/", get(index))
        .route("/hello/", get(hello))
        .route("/calc/add/", post(add))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest(&state.api_prefix, api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
