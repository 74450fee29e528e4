//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home page
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database)
//!
//! # Products
//! GET  /products?category=            - Product listing
//! GET  /products/{slug}?size=&image=&tab= - Product detail
//!
//! # JSON API
//! GET  /api/site-settings             - Effective site settings
//! GET  /api/products                  - Product catalog
//! GET  /api/products/{slug}/price?size= - Price quote
//! ```

pub mod api;
pub mod home;
pub mod products;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/site-settings", get(api::site_settings))
        .route("/products", get(api::products))
        .route("/products/{slug}/price", get(api::price))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/api", api_routes())
}
