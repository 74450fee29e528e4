//! Site settings API.
//!
//! Saving replaces the whole record. The response carries the effective
//! settings built from the record as saved, which is what the storefront
//! serves once its cache entry expires.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use dryfruto_core::{EffectiveSiteSettings, SiteSettingsRecord, resolve_settings};

use crate::db::SettingsRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminToken;
use crate::state::AppState;

/// Stored record alongside what the storefront resolves from it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub record: SiteSettingsRecord,
    pub effective: EffectiveSiteSettings,
}

impl SettingsResponse {
    fn new(record: SiteSettingsRecord) -> Self {
        let effective = resolve_settings(Some(&record));
        Self { record, effective }
    }
}

/// Show the stored settings record.
#[instrument(skip_all)]
pub async fn show(
    _auth: RequireAdminToken,
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>> {
    let record = SettingsRepository::new(state.pool())
        .load()
        .await?
        .unwrap_or_default();
    Ok(Json(SettingsResponse::new(record)))
}

/// Replace the stored settings record.
#[instrument(skip_all)]
pub async fn update(
    _auth: RequireAdminToken,
    State(state): State<AppState>,
    Json(mut record): Json<SiteSettingsRecord>,
) -> Result<Json<SettingsResponse>> {
    record.validate()?;
    validate_links(&record)?;
    record.normalize_phone();

    SettingsRepository::new(state.pool()).save(&record).await?;

    Ok(Json(SettingsResponse::new(record)))
}

/// Check that every non-empty link field is an absolute http(s) URL.
fn validate_links(record: &SiteSettingsRecord) -> Result<()> {
    let links = [
        ("logo", &record.logo),
        ("whatsappLink", &record.whatsapp_link),
        ("facebookLink", &record.facebook_link),
        ("instagramLink", &record.instagram_link),
        ("twitterLink", &record.twitter_link),
        ("youtubeLink", &record.youtube_link),
    ];

    for (field, value) in links {
        let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        let url = Url::parse(value)
            .map_err(|e| AppError::Validation(format!("{field}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "{field}: expected an http or https URL"
            )));
        }
    }
    Ok(())
}
