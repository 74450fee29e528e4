//! Site settings lookup.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use dryfruto_core::SiteSettingsRecord;

use super::RepositoryError;

/// Key under which the settings record is stored.
pub const SITE_SETTINGS_KEY: &str = "site_settings";

/// Read-only access to the persisted settings record.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the settings record, or `None` if the admin has never saved one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored value is not an object.
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

        value.map(parse_record).transpose()
    }
}

/// Decode a stored settings document. `null` is treated as an empty record.
pub fn parse_record(value: JsonValue) -> Result<SiteSettingsRecord, RepositoryError> {
    if value.is_null() {
        return Ok(SiteSettingsRecord::default());
    }
    serde_json::from_value(value)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid site settings: {e}")))
}
