//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/v1/checkout - Create a Mercado Pago checkout session
/// - GET  /api/v1/products - List products from the published sheet
pub fn create_router(state: AppState) -> Router {
    // Browsers call the checkout endpoint straight from the storefront,
    // so CORS stays permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/checkout",
            post(handlers::create_checkout).options(handlers::checkout_preflight),
        )
        .route("/products", get(handlers::list_products));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
