//! Database operations for the marketplace `PostgreSQL` store.
//!
//! # Tables
//!
//! - `food` - Catalog items with inventory counters
//! - `purchase` - The purchase ledger
//! - `feedback` - Append-only visitor feedback
//!
//! Every store call carries a bounded timeout; a call that does not finish
//! within [`STORE_TIMEOUT`] surfaces as [`RepositoryError::Timeout`] and is
//! mapped to a 503 at the HTTP boundary. No retries are performed.
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and are applied once at
//! startup via `sqlx::migrate!`.

pub mod feedback;
pub mod foods;
pub mod purchases;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use feedback::FeedbackRepository;
pub use foods::{FoodFilter, FoodRepository};
pub use purchases::{PurchaseFilter, PurchaseRepository};

/// Upper bound for a single store call.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store did not answer within [`STORE_TIMEOUT`].
    #[error("store call timed out")]
    Timeout,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool is the single process-wide store handle: it is created once at
/// startup and closed after graceful shutdown.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run a store call under the bounded [`STORE_TIMEOUT`].
pub(crate) async fn with_timeout<T, F>(fut: F) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(STORE_TIMEOUT, fut).await {
        Ok(result) => result.map_err(RepositoryError::Database),
        Err(_elapsed) => Err(RepositoryError::Timeout),
    }
}
