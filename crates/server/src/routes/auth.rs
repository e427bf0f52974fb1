//! Token issuance and logout.
//!
//! `POST /jwt` signs the posted identity into the `token` cookie; the
//! frontend calls it right after its own login step. `GET /logOut` clears
//! the cookie client-side - no server state exists to revoke.

use axum::{
    Json,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::middleware::{auth_cookie, clear_auth_cookie};
use crate::models::Identity;
use crate::state::AppState;

/// Body of the cookie-setting endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Issue a token for the posted identity and set the auth cookie.
///
/// POST /jwt
///
/// # Errors
///
/// Returns `AppError::Internal` if signing fails.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(identity): Json<Identity>,
) -> Result<impl IntoResponse> {
    let token = state
        .tokens()
        .issue(&identity)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::debug!(email = %identity.email, "token issued");

    let cookie = auth_cookie(token, state.config().environment);

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie.to_string())]),
        Json(SuccessResponse { success: true }),
    ))
}

/// Clear the auth cookie.
///
/// GET /logOut
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_auth_cookie(state.config().environment);

    (
        AppendHeaders([(header::SET_COOKIE, cookie.to_string())]),
        Json(SuccessResponse { success: true }),
    )
}
