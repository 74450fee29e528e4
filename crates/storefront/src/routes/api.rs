//! JSON API handlers.
//!
//! Used by client-side widgets that need the same resolved values the HTML
//! pages render.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use dryfruto_core::contact::{chat_url, inquiry_message};
use dryfruto_core::{EffectiveSiteSettings, Price, PricingError, Product, SizeKey, quote};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Size parameter for price quotes.
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    pub size: Option<String>,
}

/// Resolved price for one product size.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub slug: String,
    pub size: SizeKey,
    pub label: &'static str,
    pub price: Price,
    pub display: String,
    pub chat_url: String,
}

/// Effective site settings.
#[instrument(skip(state))]
pub async fn site_settings(State(state): State<AppState>) -> Json<EffectiveSiteSettings> {
    let settings = state.cache().settings(state.pool()).await;
    Json(settings.as_ref().clone())
}

/// Full product catalog.
#[instrument(skip(state))]
pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let catalog = state.cache().catalog(state.pool()).await?;
    Ok(Json(catalog.as_ref().clone()))
}

/// Price quote for a product size (default size when `size` is omitted).
///
/// Unknown sizes are rejected with 400; a product without a base price
/// yields 422.
#[instrument(skip(state))]
pub async fn price(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<PriceResponse>> {
    let size = match query.size.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => key.parse::<SizeKey>().map_err(PricingError::from)?,
        _ => SizeKey::default(),
    };

    let product = state
        .cache()
        .product(state.pool(), &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;
    let settings = state.cache().settings(state.pool()).await;

    let quote = quote(&product, size)?;
    let message = inquiry_message(&product.name, quote.label, Some(&quote));

    Ok(Json(PriceResponse {
        slug: product.slug,
        size,
        label: quote.label,
        price: quote.price,
        display: quote.display(),
        chat_url: chat_url(&settings.whatsapp_link, &message),
    }))
}
