//! Cached snapshots of site settings and the product catalog.
//!
//! Each entry is an immutable `Arc` snapshot. Handlers clone the `Arc` and
//! render from it; a save in the admin becomes visible here when the entry
//! expires and the next request loads a fresh snapshot.
//!
//! Settings never fail to load from a handler's point of view: if the
//! database read fails the built-in defaults are served and nothing is
//! cached, so the next request retries.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use dryfruto_core::{EffectiveSiteSettings, Product, resolve_settings};

use crate::db::{ProductRepository, RepositoryError, SettingsRepository};

/// Cache key.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    Settings,
    Catalog,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Settings(Arc<EffectiveSiteSettings>),
    Catalog(Arc<Vec<Product>>),
}

/// Time-bounded cache in front of the settings and product tables.
#[derive(Clone)]
pub struct SiteCache {
    cache: Cache<CacheKey, CacheValue>,
}

impl SiteCache {
    /// Create a cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(8).time_to_live(ttl).build();
        Self { cache }
    }

    /// Effective settings snapshot, falling back to defaults if loading fails.
    #[instrument(skip_all)]
    pub async fn settings(&self, pool: &PgPool) -> Arc<EffectiveSiteSettings> {
        if let Some(CacheValue::Settings(settings)) = self.cache.get(&CacheKey::Settings).await {
            debug!("site settings cache hit");
            return settings;
        }

        match SettingsRepository::new(pool).load().await {
            Ok(record) => {
                let settings = Arc::new(resolve_settings(record.as_ref()));
                self.cache
                    .insert(CacheKey::Settings, CacheValue::Settings(Arc::clone(&settings)))
                    .await;
                settings
            }
            Err(e) => {
                warn!(error = %e, "failed to load site settings, serving defaults");
                Arc::new(EffectiveSiteSettings::default())
            }
        }
    }

    /// Full product catalog in display order.
    ///
    /// # Errors
    ///
    /// Returns the repository error if the catalog cannot be read.
    #[instrument(skip_all)]
    pub async fn catalog(&self, pool: &PgPool) -> Result<Arc<Vec<Product>>, RepositoryError> {
        if let Some(CacheValue::Catalog(products)) = self.cache.get(&CacheKey::Catalog).await {
            debug!("catalog cache hit");
            return Ok(products);
        }

        let products = Arc::new(ProductRepository::new(pool).list_all().await?);
        self.cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(Arc::clone(&products)))
            .await;
        Ok(products)
    }

    /// Look up a single product by slug.
    ///
    /// # Errors
    ///
    /// Returns the repository error if the catalog cannot be read.
    pub async fn product(
        &self,
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let catalog = self.catalog(pool).await?;
        Ok(catalog.iter().find(|p| p.slug == slug).cloned())
    }
}
