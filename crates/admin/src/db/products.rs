//! Product catalog storage.

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
        product.slug = row.slug;
        Ok(product)
    }
}

/// Repository for product documents.
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

    /// Get a product by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT slug, data FROM site.products
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert or replace a product.
    ///
    /// New products go to the end of the catalog unless `position` is given.
    /// Existing products keep their position unless `position` is given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        product: &Product,
        position: Option<i32>,
    ) -> Result<(), RepositoryError> {
        let data = serde_json::to_value(product).map_err(|e| {
            RepositoryError::DataCorruption(format!("unencodable product {:?}: {e}", product.slug))
        })?;

        sqlx::query(
            r"
            INSERT INTO site.products (slug, position, data)
            VALUES (
                $1,
                COALESCE($2, (SELECT COALESCE(MAX(position) + 1, 0) FROM site.products)),
                $3
            )
            ON CONFLICT (slug) DO UPDATE SET
                position = COALESCE($2, site.products.position),
                data = EXCLUDED.data,
                updated_at = NOW()
            ",
        )
        .bind(&product.slug)
        .bind(position)
        .bind(data)
        .execute(self.pool)
        .await?;

        tracing::info!(slug = %product.slug, "product saved");
        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this slug.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, slug: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM site.products
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(%slug, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_row_slug_overrides_document() {
        let row = ProductRow {
            slug: "anjeer".to_string(),
            data: json!({"slug": "figs", "name": "Anjeer", "basePrice": "240"}),
        };
        let product = Product::try_from(row).unwrap();
        assert_eq!(product.slug, "anjeer");
        assert_eq!(product.name, "Anjeer");
    }

    #[test]
    fn test_row_rejects_non_object() {
        let row = ProductRow {
            slug: "anjeer".to_string(),
            data: json!(null),
        };
        assert!(matches!(
            Product::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
