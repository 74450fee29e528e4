//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    token_digest: [u8; 32],
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let token_digest = token_digest(config.api_token.expose_secret());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                token_digest,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Check a presented bearer token against the configured one.
    ///
    /// Compares SHA-256 digests of both tokens.
    #[must_use]
    pub fn token_matches(&self, presented: &str) -> bool {
        token_digest(presented) == self.inner.token_digest
    }
}

fn token_digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
