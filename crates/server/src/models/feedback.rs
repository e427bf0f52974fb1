//! Feedback models.
//!
//! Feedback is append-only: no update or delete operation exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use food_villa_core::{Email, FeedbackId};

/// A feedback entry left by a visitor.
#[derive(Debug, Clone, Serialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub name: String,
    pub email: Email,
    pub rating: i32,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for leaving feedback (`POST /feedback`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewFeedback {
    pub name: String,
    pub email: Email,
    pub rating: i32,
    pub message: String,
}

impl NewFeedback {
    /// Rating must be a 1-5 star value.
    #[must_use]
    pub const fn rating_in_range(&self) -> bool {
        self.rating >= 1 && self.rating <= 5
    }
}
