//! Bearer-token authentication for the admin API.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Extractor that requires `Authorization: Bearer <ADMIN_API_TOKEN>`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireAdminToken) -> impl IntoResponse {
///     "secret stuff"
/// }
/// ```
pub struct RequireAdminToken;

/// Error returned when the bearer token is missing or wrong.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// No usable `Authorization` header.
    MissingToken,
    /// Token did not match.
    InvalidToken,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Missing bearer token",
            Self::InvalidToken => "Invalid bearer token",
        };
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            message,
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdminToken {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AdminAuthRejection::MissingToken)?;

        if state.token_matches(token) {
            Ok(Self)
        } else {
            tracing::warn!(path = %parts.uri.path(), "rejected admin request with invalid token");
            Err(AdminAuthRejection::InvalidToken)
        }
    }
}

/// Token part of a `Bearer` authorization value. The scheme is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
