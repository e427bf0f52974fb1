//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs binding an [`Identity`] to a 7-day expiry. The
//! service holds no revocation list: a token dies by expiry or by the client
//! clearing its cookie on logout. Both operations are pure functions of
//! token, secret and clock.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use food_villa_core::Email;

use crate::models::Identity;

/// Token lifetime: 7 days from issuance.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token is malformed or its signature does not match.
    #[error("invalid token")]
    Invalid,

    /// The token's embedded expiry is in the past.
    #[error("token expired")]
    Expired,

    /// Signing failed (key misconfiguration).
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Claims carried inside the signed token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject - the principal's email.
    sub: String,
    email: String,
    /// Issued at (unix timestamp).
    iat: i64,
    /// Expiry (unix timestamp).
    exp: i64,
}

/// Issues and verifies signed identity tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is a straight timestamp comparison, no clock-skew tolerance.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
        }
    }

    /// Sign an identity into a token with a 7-day expiry.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.email.as_str().to_owned(),
            email: identity.email.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        self.sign(&claims)
    }

    /// Verify a token's signature and expiry and recover the identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Expired` for a token past its expiry and
    /// `AuthError::Invalid` for anything malformed or tampered with.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation).map_err(
                |e| match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    _ => AuthError::Invalid,
                },
            )?;

        let email = Email::parse(&data.claims.email).map_err(|_| AuthError::Invalid)?;
        Ok(Identity::new(email))
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
