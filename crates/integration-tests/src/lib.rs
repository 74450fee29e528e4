//! Integration tests for DryFruto.
//!
//! # Running Tests
//!
//! ```bash
//! # Pure cross-crate tests
//! cargo test -p dryfruto-integration-tests
//!
//! # Database-backed tests (needs a scratch database)
//! DATABASE_URL=postgres://localhost/dryfruto_test \
//!     cargo test -p dryfruto-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `pricing` - Price resolution as seen by every consumer
//! - `site_config` - Settings saved by the admin, rendered by the storefront
//! - `catalog_store` - Admin writes and storefront reads through `PostgreSQL`

use dryfruto_core::{Price, Product};
use sqlx::PgPool;

/// Product with the reference prices used across the tests.
///
/// Base 500, with `1kg` overridden to 3999.
#[must_use]
pub fn california_almonds() -> Product {
    let mut product = Product::new("california-almonds", "California Almonds", Price::from_rupees(500));
    product.images = vec![
        "https://cdn.dryfruto.com/almonds-1.jpg".to_string(),
        "https://cdn.dryfruto.com/almonds-2.jpg".to_string(),
    ];
    product.category = Some("nuts".to_string());
    product
        .price_variants
        .insert("1kg".to_string(), Price::from_rupees(3999));
    product
}

/// Connect to `DATABASE_URL` and apply the migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable.
pub async fn migrated_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for database tests");
    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("../admin/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
