//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Liveness check
//! GET    /health/ready               - Readiness check (database)
//!
//! # Bearer token required
//! GET    /api/site-settings          - Stored record + effective settings
//! PUT    /api/site-settings          - Replace the stored record
//! GET    /api/products               - Catalog in display order
//! GET    /api/products/{slug}        - One product
//! PUT    /api/products/{slug}        - Create or replace a product
//! DELETE /api/products/{slug}        - Remove a product
//! ```

pub mod products;
pub mod settings;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

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

/// Create the admin API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/site-settings",
            get(settings::show).put(settings::update),
        )
        .route("/products", get(products::index))
        .route(
            "/products/{slug}",
            get(products::show)
                .put(products::upsert)
                .delete(products::destroy),
        )
}

/// Create all routes for the admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
}
