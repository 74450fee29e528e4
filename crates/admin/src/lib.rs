//! DryFruto Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Security
//!
//! Every `/api` route requires `Authorization: Bearer <ADMIN_API_TOKEN>`.
//! Bind to a private interface; the storefront never talks to this binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the admin router with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::AdminConfig;

    const TOKEN: &str = "Zq8vN2kLp4Rt7Wx1Yc5Hb9Jm3Df6Gs0A";

    /// State whose pool points at a database that is never reachable.
    fn offline_state() -> AppState {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://dryfruto@127.0.0.1:1/dryfruto")
            .unwrap();
        let config = AdminConfig {
            database_url: SecretString::from("postgres://dryfruto@127.0.0.1:1/dryfruto"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            api_token: SecretString::from(TOKEN),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        AppState::new(config, pool)
    }

    async fn send(request: Request<Body>) -> StatusCode {
        app(offline_state()).oneshot(request).await.unwrap().status()
    }

    fn put_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        assert_eq!(send(request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let request = Request::builder()
            .uri("/api/site-settings")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(request).await, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/api/products")
            .header(header::AUTHORIZATION, "Bearer not-the-token")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_settings_save_rejects_invalid_phone() {
        let request = put_json("/api/site-settings", Some(TOKEN), r#"{"phone": "12345"}"#);
        assert_eq!(send(request).await, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_settings_save_rejects_unknown_color_slot() {
        let request = put_json(
            "/api/site-settings",
            Some(TOKEN),
            r##"{"pageStyles": {"footer": {"footerBackground": "#000"}}}"##,
        );
        assert_eq!(send(request).await, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_product_save_rejects_slug_mismatch() {
        let request = put_json(
            "/api/products/cashews",
            Some(TOKEN),
            r#"{"slug": "almonds", "name": "Almonds", "basePrice": 500}"#,
        );
        assert_eq!(send(request).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_product_save_rejects_out_of_range_prices() {
        let request = put_json(
            "/api/products/figs",
            Some(TOKEN),
            r#"{"name": "Figs", "basePrice": "10000000000000000000000000000"}"#,
        );
        assert_eq!(send(request).await, StatusCode::UNPROCESSABLE_ENTITY);

        let request = put_json(
            "/api/products/figs",
            Some(TOKEN),
            r#"{"name": "Figs", "basePrice": 500, "priceVariants": {"1kg": "3999.999"}}"#,
        );
        assert_eq!(send(request).await, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_product_save_reports_database_error() {
        let request = put_json(
            "/api/products/cashews",
            Some(TOKEN),
            r#"{"name": "Cashews", "basePrice": 180}"#,
        );
        assert_eq!(send(request).await, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
