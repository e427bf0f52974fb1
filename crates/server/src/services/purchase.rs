//! The purchase workflow - the one multi-step mutation in the system.
//!
//! Recording a sale touches two documents: a new ledger row and the item's
//! inventory counters. Both writes run inside a single transaction so a
//! failure between them can never leave a ledger entry that inventory does
//! not reflect. The counter adjustment itself is one guarded UPDATE, so
//! concurrent purchases of the same item serialize on the row and underflow
//! is rejected rather than driving `quantity` negative.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::db::{self, RepositoryError, foods, purchases};
use crate::models::purchase::{NewPurchase, Purchase};

/// Errors that can occur while recording a purchase.
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// Quantity must be a positive amount.
    #[error("purchase quantity must be at least 1")]
    InvalidQuantity,

    /// The referenced catalog item does not exist.
    #[error("food item not found")]
    FoodNotFound,

    /// The item exists but has fewer units in stock than requested.
    #[error("insufficient stock for the requested quantity")]
    InsufficientStock,

    /// Store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Record a purchase: adjust the item's counters and insert the ledger row
/// in one transaction.
///
/// After a successful call for quantity `q` on an item with counters
/// `(purchase_count, quantity) = (p0, s0)`, the item reads `(p0 + q, s0 - q)`
/// and the returned ledger entry references it.
///
/// # Errors
///
/// Returns `PurchaseError::InvalidQuantity` for a non-positive quantity,
/// `PurchaseError::FoodNotFound` / `PurchaseError::InsufficientStock` when
/// the counter adjustment matches no row, and
/// `PurchaseError::Repository` for store failures (including timeout).
pub async fn execute(pool: &PgPool, new: NewPurchase) -> Result<Purchase, PurchaseError> {
    if new.quantity < 1 {
        return Err(PurchaseError::InvalidQuantity);
    }

    // The whole transaction runs under the per-call store timeout.
    match tokio::time::timeout(db::STORE_TIMEOUT, run_transaction(pool, new)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(RepositoryError::Timeout.into()),
    }
}

async fn run_transaction(pool: &PgPool, new: NewPurchase) -> Result<Purchase, PurchaseError> {
    let mut tx = pool.begin().await.map_err(RepositoryError::Database)?;

    // Counter adjustment first: it carries the underflow guard, so a doomed
    // purchase bails before the ledger is touched.
    let adjusted = sqlx::query(foods::ADJUST_COUNTERS)
        .bind(new.food_id)
        .bind(new.quantity)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::Database)?
        .rows_affected();

    if adjusted == 0 {
        // Distinguish a missing item from an out-of-stock one.
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM food WHERE id = $1)")
                .bind(new.food_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(RepositoryError::Database)?;

        tx.rollback().await.map_err(RepositoryError::Database)?;

        return Err(if exists {
            PurchaseError::InsufficientStock
        } else {
            PurchaseError::FoodNotFound
        });
    }

    let row = purchases::bind_insert(&new)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::Database)?;

    tx.commit().await.map_err(RepositoryError::Database)?;

    let purchase = Purchase::try_from(row)?;
    info!(
        purchase_id = %purchase.id,
        food_id = %purchase.food_id,
        quantity = purchase.quantity,
        "purchase recorded"
    );

    Ok(purchase)
}
