//! Repository for append-only feedback.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};

use food_villa_core::{Email, FeedbackId};

use super::{RepositoryError, with_timeout};
use crate::models::feedback::{Feedback, NewFeedback};

/// Internal row type for feedback queries.
#[derive(Debug, sqlx::FromRow)]
struct FeedbackRow {
    id: FeedbackId,
    name: String,
    email: String,
    rating: i32,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = RepositoryError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email,
            rating: row.rating,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

/// Repository for feedback database operations.
pub struct FeedbackRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedbackRepository<'a> {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all feedback, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn list(&self) -> Result<Vec<Feedback>, RepositoryError> {
        let rows = with_timeout(
            sqlx::query_as::<Postgres, FeedbackRow>(
                "SELECT id, name, email, rating, message, created_at \
                 FROM feedback ORDER BY created_at DESC",
            )
            .fetch_all(self.pool),
        )
        .await?;

        rows.into_iter().map(Feedback::try_from).collect()
    }

    /// Insert a new feedback entry; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback, RepositoryError> {
        let row = with_timeout(
            sqlx::query_as::<Postgres, FeedbackRow>(
                "INSERT INTO feedback (name, email, rating, message) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, name, email, rating, message, created_at",
            )
            .bind(&feedback.name)
            .bind(feedback.email.as_str())
            .bind(feedback.rating)
            .bind(&feedback.message)
            .fetch_one(self.pool),
        )
        .await?;

        Feedback::try_from(row)
    }
}
