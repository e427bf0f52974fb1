//! Feedback route handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::db::FeedbackRepository;
use crate::error::{AppError, Result};
use crate::models::{Feedback, NewFeedback};
use crate::state::AppState;

/// List all feedback, newest first.
///
/// GET /feedbacks
///
/// # Errors
///
/// Returns a store error if the listing fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>> {
    let entries = FeedbackRepository::new(state.pool()).list().await?;
    Ok(Json(entries))
}

/// Leave feedback.
///
/// POST /feedback
///
/// # Errors
///
/// Returns `AppError::Validation` for an out-of-range rating, or a store
/// error if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    Json(feedback): Json<NewFeedback>,
) -> Result<(StatusCode, Json<Feedback>)> {
    if !feedback.rating_in_range() {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_owned(),
        ));
    }

    let inserted = FeedbackRepository::new(state.pool())
        .insert(&feedback)
        .await?;
    Ok((StatusCode::CREATED, Json(inserted)))
}
