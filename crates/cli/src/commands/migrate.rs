//! Database migration command.
//!
//! Applies `crates/admin/migrations/`, which create the `site` schema read
//! by the storefront and written by the admin.

use thiserror::Error;

/// Errors from running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let pool = super::connect()
        .await
        .map_err(|e| MigrationError::Connect(e.to_string()))?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
