//! Access guard extractors.
//!
//! This is the only authorization rule in the system - an equality check
//! between the verified token identity and the identity the request claims,
//! not a role or capability check.

use axum::{
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::cookie::token_from_headers;
use crate::models::Identity;
use crate::state::AppState;

/// Extractor that requires a valid auth token.
///
/// Verifies the `token` cookie and injects the verified [`Identity`].
/// Rejects with 401 when the cookie is absent, malformed, tampered with or
/// expired. Handlers that mutate owner-scoped records combine this with
/// [`Identity`] equality checks against the payload's owner field.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     Authenticated(identity): Authenticated,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.email)
/// }
/// ```
pub struct Authenticated(pub Identity);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("missing auth token".to_owned()))?;

        let identity = state
            .tokens()
            .verify(&token)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        Ok(Self(identity))
    }
}

/// Query parameter carrying the claimed owner identity.
#[derive(Debug, Deserialize)]
struct OwnerQuery {
    email: String,
}

/// Extractor for owner-scoped reads (`/myFood`, `/myPurchasedFood`).
///
/// On top of [`Authenticated`], compares the verified identity against the
/// `email` query parameter: a mismatch is 403 Forbidden, so one user cannot
/// read another user's rows by naming their email.
pub struct RequireOwner(pub Identity);

impl<S> FromRequestParts<S> for RequireOwner
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Authenticated(identity) = Authenticated::from_request_parts(parts, state).await?;

        let Query(query) = Query::<OwnerQuery>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::Validation("missing email query parameter".to_owned()))?;

        ensure_owner(&identity, &query.email)?;

        Ok(Self(identity))
    }
}

/// Check that the verified identity matches the claimed owner email exactly.
///
/// # Errors
///
/// Returns `AppError::Forbidden` on any mismatch.
pub fn ensure_owner(identity: &Identity, claimed_email: &str) -> Result<(), AppError> {
    if identity.email.as_str() == claimed_email {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "token identity does not match the record owner".to_owned(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use food_villa_core::Email;

    #[test]
    fn test_ensure_owner_match() {
        let identity = Identity::new(Email::parse("a@x.com").unwrap());
        assert!(ensure_owner(&identity, "a@x.com").is_ok());
    }

    #[test]
    fn test_ensure_owner_mismatch() {
        let identity = Identity::new(Email::parse("a@x.com").unwrap());
        let err = ensure_owner(&identity, "b@x.com").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_ensure_owner_is_exact_not_case_insensitive() {
        let identity = Identity::new(Email::parse("a@x.com").unwrap());
        assert!(ensure_owner(&identity, "A@x.com").is_err());
    }
}
