//! Product catalog API.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use dryfruto_core::Product;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminToken;
use crate::state::AppState;

/// List all products in display order.
#[instrument(skip_all)]
pub async fn index(
    _auth: RequireAdminToken,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// Show one product.
#[instrument(skip_all, fields(%slug))]
pub async fn show(
    _auth: RequireAdminToken,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))
}

/// Create or replace a product.
#[instrument(skip_all, fields(%slug))]
pub async fn upsert(
    _auth: RequireAdminToken,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(mut product): Json<Product>,
) -> Result<Json<Product>> {
    prepare(&slug, &mut product)?;
    ProductRepository::new(state.pool())
        .upsert(&product, None)
        .await?;
    Ok(Json(product))
}

/// Remove a product.
#[instrument(skip_all, fields(%slug))]
pub async fn destroy(
    _auth: RequireAdminToken,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool()).delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fill in the slug from the path and validate.
fn prepare(slug: &str, product: &mut Product) -> Result<()> {
    if product.slug.is_empty() {
        slug.clone_into(&mut product.slug);
    } else if product.slug != slug {
        return Err(AppError::BadRequest(format!(
            "body slug {:?} does not match path slug {slug:?}",
            product.slug
        )));
    }
    product.validate()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dryfruto_core::Price;

    use super::*;

    #[test]
    fn test_prepare_fills_slug_from_path() {
        let mut product = Product::new("", "Cashews", Price::from_rupees(180));
        prepare("cashews", &mut product).unwrap();
        assert_eq!(product.slug, "cashews");
    }

    #[test]
    fn test_prepare_rejects_mismatched_slug() {
        let mut product = Product::new("almonds", "Almonds", Price::from_rupees(180));
        assert!(matches!(
            prepare("cashews", &mut product),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_prepare_validates() {
        let mut product = Product::new("cashews", "Cashews", Price::from_rupees(180));
        product.base_price = None;
        assert!(matches!(
            prepare("cashews", &mut product),
            Err(AppError::Validation(_))
        ));

        let mut product = Product::new("Cashews!", "Cashews", Price::from_rupees(180));
        assert!(matches!(
            prepare("Cashews!", &mut product),
            Err(AppError::Validation(_))
        ));
    }
}
