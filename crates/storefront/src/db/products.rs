//! Product catalog lookup.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use dryfruto_core::Product;

use super::RepositoryError;

/// Internal row type for `site.products`.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    slug: String,
    data: JsonValue,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let mut product: Self = serde_json::from_value(row.data).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid product {:?}: {e}", row.slug))
        })?;
        // the key column wins over whatever the document says
        product.slug = row.slug;
        Ok(product)
    }
}

/// Read-only access to the product catalog.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a document is not a product.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT slug, data FROM site.products
            ORDER BY position, slug
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
