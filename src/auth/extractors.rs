use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use super::jwt::SessionKeys;
use crate::{error::ApiError, state::AppState};

/// Extracts and validates the `token` cookie, yielding the caller's email.
#[derive(Debug)]
pub struct SessionUser {
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get("token")
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(ApiError::unauthorized)?;

        let keys = SessionKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|e| {
            warn!(error = %e, "invalid or expired session token");
            ApiError::unauthorized()
        })?;

        Ok(SessionUser {
            email: claims.email,
        })
    }
}
