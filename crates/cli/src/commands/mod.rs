//! CLI subcommands.

pub mod migrate;
pub mod price;
pub mod seed;
pub mod settings;

use sqlx::PgPool;

use dryfruto_admin::config::get_database_url;
use dryfruto_admin::db;

/// Connect using `ADMIN_DATABASE_URL`, falling back to `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let database_url = get_database_url("ADMIN_DATABASE_URL")?;
    let pool = db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}
