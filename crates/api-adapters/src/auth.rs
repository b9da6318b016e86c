//! Bearer token extractor for protected routes.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use domains::{AppError, Caller};

use crate::{error::ApiError, state::AppState};

/// Verified caller identity, extracted from `Authorization: Bearer <jwt>`.
/// A missing or malformed header is `Unauthenticated` (401); a token that
/// fails cryptographic verification or has expired is `Forbidden` (403).
pub struct AuthUser(pub Caller);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthenticated("Authentication failed. No token.".into()))?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthenticated("Authentication failed. No token.".into())
        })?;

        let caller = state.tokens.verify(token).map_err(|_| {
            AppError::Forbidden("Authentication failed. Invalid token.".into())
        })?;
        Ok(AuthUser(caller))
    }
}
