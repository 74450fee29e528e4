//! Site settings storage.
//!
//! The whole record is one JSONB document. Saving replaces it.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use dryfruto_core::SiteSettingsRecord;

use super::RepositoryError;

/// Key under which the settings record is stored.
pub const SITE_SETTINGS_KEY: &str = "site_settings";

/// Repository for the site settings record.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the stored record, or `None` if it was never saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored value is not a record.
    pub async fn load(&self) -> Result<Option<SiteSettingsRecord>, RepositoryError> {
        let value = sqlx::query_scalar::<_, JsonValue>(
            r"
            SELECT value FROM site.settings
            WHERE key = $1
            ",
        )
        .bind(SITE_SETTINGS_KEY)
        .fetch_optional(self.pool)
        .await?;

        value.map(decode).transpose()
    }

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn save(&self, record: &SiteSettingsRecord) -> Result<(), RepositoryError> {
        let value = encode(record)?;
        sqlx::query(
            r"
            INSERT INTO site.settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
            ",
        )
        .bind(SITE_SETTINGS_KEY)
        .bind(value)
        .execute(self.pool)
        .await?;

        tracing::info!("site settings saved");
        Ok(())
    }
}

fn decode(value: JsonValue) -> Result<SiteSettingsRecord, RepositoryError> {
    if value.is_null() {
        return Ok(SiteSettingsRecord::default());
    }
    serde_json::from_value(value)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid site settings: {e}")))
}

fn encode(record: &SiteSettingsRecord) -> Result<JsonValue, RepositoryError> {
    serde_json::to_value(record)
        .map_err(|e| RepositoryError::DataCorruption(format!("unencodable site settings: {e}")))
}
