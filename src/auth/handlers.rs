use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::{info, instrument};

use super::{
    dto::{SessionRequest, SessionResponse},
    jwt::SessionKeys,
};
use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_session))
}

/// Signs a 1-hour session token for the submitted identity and sets it as an
/// HTTP-only cookie. The cookie is deliberately not marked Secure; the
/// original served localhost over plain HTTP.
#[instrument(skip(state, jar, payload))]
pub async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SessionRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let keys = SessionKeys::from_ref(&state);
    let token = keys
        .sign(&payload.email)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let cookie = Cookie::build(("token", token))
        .path("/")
        .http_only(true)
        .secure(false)
        .build();

    info!(email = %payload.email, "session issued");
    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}
