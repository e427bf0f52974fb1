//! The authenticated principal.

use serde::{Deserialize, Serialize};

use food_villa_core::Email;

/// The authenticated principal, represented by an email address.
///
/// Carried inside the signed token and injected into handlers by the access
/// guard. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: Email,
}

impl Identity {
    /// Create an identity for the given email.
    #[must_use]
    pub const fn new(email: Email) -> Self {
        Self { email }
    }
}
