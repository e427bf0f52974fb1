//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`. Client responses for store failures carry a
//! generic message - store internals never leak to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::PurchaseError;

/// Application-level error type for the marketplace API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid auth token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid token, but the identity does not own the record.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or unacceptable input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Purchase workflow failed.
    #[error("Purchase error: {0}")]
    Purchase(#[from] PurchaseError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Internal(_) | Self::Repository(_) => true,
            Self::Purchase(err) => matches!(err, PurchaseError::Repository(_)),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Repository(err) => repository_status(err),
            Self::Purchase(err) => match err {
                PurchaseError::InvalidQuantity | PurchaseError::InsufficientStock => {
                    StatusCode::BAD_REQUEST
                }
                PurchaseError::FoodNotFound => StatusCode::NOT_FOUND,
                PurchaseError::Repository(inner) => repository_status(inner),
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose store internals to clients
        let message = match &self {
            Self::Repository(err) | Self::Purchase(PurchaseError::Repository(err)) => {
                repository_message(err).to_string()
            }
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

const fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

const fn repository_message(err: &RepositoryError) -> &'static str {
    match err {
        RepositoryError::Timeout => "Store unavailable",
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
            "Internal server error"
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("food 123".to_string());
        assert_eq!(err.to_string(), "Not found: food 123");

        let err = AppError::Validation("bad rating".to_string());
        assert_eq!(err.to_string(), "Validation failed: bad rating");
    }

    #[test]
    fn test_auth_status_codes() {
        assert_eq!(
            get_status(AppError::Unauthorized("no token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("not yours".to_string())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_store_status_codes() {
        assert_eq!(
            get_status(AppError::Repository(RepositoryError::Timeout)),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(AppError::Repository(RepositoryError::DataCorruption(
                "bad row".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_purchase_status_codes() {
        assert_eq!(
            get_status(AppError::Purchase(PurchaseError::InsufficientStock)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Purchase(PurchaseError::FoodNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Purchase(PurchaseError::Repository(
                RepositoryError::Timeout
            ))),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_errors_never_leak_internals() {
        let err = AppError::Repository(RepositoryError::DataCorruption(
            "invalid adder_email in row 17".to_string(),
        ));
        let response = err.into_response();
        // Body is the generic message; the detail stays in logs/Sentry.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
