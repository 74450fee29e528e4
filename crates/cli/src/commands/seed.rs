//! Seed the product catalog from a YAML file.
//!
//! ```yaml
//! products:
//!   - slug: california-almonds
//!     name: California Almonds
//!     basePrice: 500
//!     priceVariants:
//!       1kg: 3999
//!     images:
//!       - https://cdn.dryfruto.com/almonds.jpg
//! ```
//!
//! Products are stored in file order. Existing slugs are replaced.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use dryfruto_admin::db::ProductRepository;
use dryfruto_core::Product;

/// Top-level shape of a seed file.
#[derive(Debug, Deserialize)]
pub struct ProductSeedFile {
    pub products: Vec<Product>,
}

/// Seed products from a YAML file.
///
/// The whole file is validated before anything is written.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any product fails
/// validation, or a database write fails.
pub async fn products(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %path.display(), "Loading products from file");

    let content = tokio::fs::read_to_string(path).await?;
    let seed: ProductSeedFile = serde_yaml::from_str(&content)?;
    info!(products = seed.products.len(), "Parsed seed file");

    let errors = validate(&seed.products);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let pool = super::connect().await?;
    let repo = ProductRepository::new(&pool);

    for (position, product) in seed.products.iter().enumerate() {
        let position = i32::try_from(position)?;
        repo.upsert(product, Some(position)).await?;
    }

    info!("Seeding complete! {} products written", seed.products.len());
    Ok(())
}

/// Every problem in the file, one line per product.
fn validate(products: &[Product]) -> Vec<String> {
    let mut errors = Vec::new();
    for (index, product) in products.iter().enumerate() {
        if let Err(e) = product.validate() {
            errors.push(format!("product #{} ({:?}): {e}", index + 1, product.slug));
        }
        if products
            .iter()
            .take(index)
            .any(|earlier| earlier.slug == product.slug)
        {
            errors.push(format!(
                "product #{}: duplicate slug {:?}",
                index + 1,
                product.slug
            ));
        }
    }
    errors
}
