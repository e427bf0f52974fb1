//! Ledger repository for purchases.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

use food_villa_core::{Email, FoodId, PurchaseId};

use super::{RepositoryError, with_timeout};
use crate::models::purchase::{NewPurchase, Purchase};

const SELECT_PURCHASE: &str = "SELECT id, food_id, buyer_email, quantity, food_name, food_image, \
     price, ordered_at FROM purchase";

pub(crate) const INSERT_PURCHASE: &str = "INSERT INTO purchase (food_id, buyer_email, quantity, food_name, food_image, price) \
     VALUES ($1, $2, $3, $4, $5, $6) \
     RETURNING id, food_id, buyer_email, quantity, food_name, food_image, price, ordered_at";

/// Filter for ledger listings.
#[derive(Debug, Clone)]
pub enum PurchaseFilter {
    /// All ledger entries.
    All,
    /// Exact match on `buyer_email`.
    BuyerEmail(Email),
}

/// Internal row type for purchase queries.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PurchaseRow {
    id: PurchaseId,
    food_id: FoodId,
    buyer_email: String,
    quantity: i32,
    food_name: String,
    food_image: String,
    price: Decimal,
    ordered_at: DateTime<Utc>,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = RepositoryError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        let buyer_email = Email::parse(&row.buyer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid buyer_email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            food_id: row.food_id,
            buyer_email,
            quantity: row.quantity,
            food_name: row.food_name,
            food_image: row.food_image,
            price: row.price,
            ordered_at: row.ordered_at,
        })
    }
}

/// Bind a new purchase to the insert statement.
///
/// Shared between the standalone repository insert and the purchase
/// transaction in `services::purchase`.
pub(crate) fn bind_insert(
    new: &NewPurchase,
) -> sqlx::query::QueryAs<'_, Postgres, PurchaseRow, sqlx::postgres::PgArguments> {
    sqlx::query_as::<Postgres, PurchaseRow>(INSERT_PURCHASE)
        .bind(new.food_id)
        .bind(new.buyer_email.as_str())
        .bind(new.quantity)
        .bind(&new.food_name)
        .bind(&new.food_image)
        .bind(new.price)
}

/// Repository for ledger database operations.
pub struct PurchaseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PurchaseRepository<'a> {
    /// Create a new ledger repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List ledger entries matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn list(&self, filter: &PurchaseFilter) -> Result<Vec<Purchase>, RepositoryError> {
        let rows = match filter {
            PurchaseFilter::All => {
                let query = format!("{SELECT_PURCHASE} ORDER BY ordered_at DESC");
                with_timeout(sqlx::query_as::<Postgres, PurchaseRow>(&query).fetch_all(self.pool))
                    .await?
            }
            PurchaseFilter::BuyerEmail(email) => {
                let query =
                    format!("{SELECT_PURCHASE} WHERE buyer_email = $1 ORDER BY ordered_at DESC");
                with_timeout(
                    sqlx::query_as::<Postgres, PurchaseRow>(&query)
                        .bind(email.as_str())
                        .fetch_all(self.pool),
                )
                .await?
            }
        };

        rows.into_iter().map(Purchase::try_from).collect()
    }

    /// Get a single ledger entry by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn get(&self, id: PurchaseId) -> Result<Option<Purchase>, RepositoryError> {
        let query = format!("{SELECT_PURCHASE} WHERE id = $1");
        let row = with_timeout(
            sqlx::query_as::<Postgres, PurchaseRow>(&query)
                .bind(id)
                .fetch_optional(self.pool),
        )
        .await?;

        row.map(Purchase::try_from).transpose()
    }

    /// Delete a ledger entry by id; returns the deleted row count (0 when
    /// the id does not exist).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn delete(&self, id: PurchaseId) -> Result<u64, RepositoryError> {
        let result = with_timeout(
            sqlx::query("DELETE FROM purchase WHERE id = $1")
                .bind(id)
                .execute(self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }
}
