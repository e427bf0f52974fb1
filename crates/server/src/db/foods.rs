//! Catalog repository for food items.
//!
//! Counter adjustment is a single atomic UPDATE so that concurrent purchases
//! of the same item cannot lose updates; the statement also refuses to drive
//! `quantity` below zero.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

use food_villa_core::{Email, FoodId};

use super::{RepositoryError, with_timeout};
use crate::models::food::{FoodItem, FoodItemUpdate, NewFoodItem};

/// Filter for catalog listings.
#[derive(Debug, Clone)]
pub enum FoodFilter {
    /// All items in store-native order.
    All,
    /// Case-insensitive substring match on `name`.
    NameContains(String),
    /// Exact match on `adder_email`.
    AdderEmail(Email),
}

const SELECT_FOOD: &str = "SELECT id, name, image, category, origin, price, made_by, quantity, \
     details, adder_email, purchase_count, created_at FROM food";

/// Atomic counter adjustment, shared with the purchase transaction.
///
/// Increments `purchase_count` and decrements `quantity` by the same
/// magnitude in one statement, guarded against inventory underflow. Affects
/// zero rows when the item is missing or stock is insufficient.
pub(crate) const ADJUST_COUNTERS: &str = "UPDATE food \
     SET purchase_count = purchase_count + $2, quantity = quantity - $2 \
     WHERE id = $1 AND quantity >= $2";

/// Internal row type for food queries.
#[derive(Debug, sqlx::FromRow)]
struct FoodRow {
    id: FoodId,
    name: String,
    image: String,
    category: String,
    origin: String,
    price: Decimal,
    made_by: String,
    quantity: i32,
    details: String,
    adder_email: String,
    purchase_count: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<FoodRow> for FoodItem {
    type Error = RepositoryError;

    fn try_from(row: FoodRow) -> Result<Self, Self::Error> {
        let adder_email = Email::parse(&row.adder_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid adder_email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            image: row.image,
            category: row.category,
            origin: row.origin,
            price: row.price,
            made_by: row.made_by,
            quantity: row.quantity,
            details: row.details,
            adder_email,
            purchase_count: row.purchase_count,
            created_at: row.created_at,
        })
    }
}

/// Repository for catalog database operations.
pub struct FoodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FoodRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List catalog items matching the filter, in store-native order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn list(&self, filter: &FoodFilter) -> Result<Vec<FoodItem>, RepositoryError> {
        let rows = match filter {
            FoodFilter::All => {
                let query = format!("{SELECT_FOOD} ORDER BY id");
                with_timeout(sqlx::query_as::<Postgres, FoodRow>(&query).fetch_all(self.pool))
                    .await?
            }
            FoodFilter::NameContains(needle) => {
                let query = format!("{SELECT_FOOD} WHERE name ILIKE $1 ORDER BY id");
                let pattern = format!("%{}%", escape_like(needle));
                with_timeout(
                    sqlx::query_as::<Postgres, FoodRow>(&query)
                        .bind(pattern)
                        .fetch_all(self.pool),
                )
                .await?
            }
            FoodFilter::AdderEmail(email) => {
                let query = format!("{SELECT_FOOD} WHERE adder_email = $1 ORDER BY id");
                with_timeout(
                    sqlx::query_as::<Postgres, FoodRow>(&query)
                        .bind(email.as_str())
                        .fetch_all(self.pool),
                )
                .await?
            }
        };

        rows.into_iter().map(FoodItem::try_from).collect()
    }

    /// List the catalog sorted by `purchase_count` descending (top foods view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn top_by_purchase_count(&self) -> Result<Vec<FoodItem>, RepositoryError> {
        let query = format!("{SELECT_FOOD} ORDER BY purchase_count DESC, id");
        let rows =
            with_timeout(sqlx::query_as::<Postgres, FoodRow>(&query).fetch_all(self.pool)).await?;
        rows.into_iter().map(FoodItem::try_from).collect()
    }

    /// Get a single catalog item by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn get(&self, id: FoodId) -> Result<Option<FoodItem>, RepositoryError> {
        let query = format!("{SELECT_FOOD} WHERE id = $1");
        let row = with_timeout(
            sqlx::query_as::<Postgres, FoodRow>(&query)
                .bind(id)
                .fetch_optional(self.pool),
        )
        .await?;

        row.map(FoodItem::try_from).transpose()
    }

    /// Insert a new catalog item; the store assigns the id and
    /// `purchase_count` starts at 0.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn insert(&self, item: &NewFoodItem) -> Result<FoodItem, RepositoryError> {
        let row = with_timeout(
            sqlx::query_as::<Postgres, FoodRow>(
                "INSERT INTO food (name, image, category, origin, price, made_by, quantity, \
                 details, adder_email) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                 RETURNING id, name, image, category, origin, price, made_by, quantity, \
                 details, adder_email, purchase_count, created_at",
            )
            .bind(&item.name)
            .bind(&item.image)
            .bind(&item.category)
            .bind(&item.origin)
            .bind(item.price)
            .bind(&item.made_by)
            .bind(item.quantity)
            .bind(&item.details)
            .bind(item.adder_email.as_str())
            .fetch_one(self.pool),
        )
        .await?;

        FoodItem::try_from(row)
    }

    /// Full overwrite of the mutable fields of an item.
    ///
    /// Never touches id, `adder_email` or `purchase_count`. Returns the
    /// number of updated rows; 0 for a missing id, which callers do not
    /// treat as an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails and
    /// `RepositoryError::Timeout` if the store does not answer in time.
    pub async fn replace_fields(
        &self,
        id: FoodId,
        fields: &FoodItemUpdate,
    ) -> Result<u64, RepositoryError> {
        let result = with_timeout(
            sqlx::query(
                "UPDATE food SET name = $2, image = $3, category = $4, origin = $5, \
                 price = $6, made_by = $7, quantity = $8, details = $9 \
                 WHERE id = $1",
            )
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.image)
            .bind(&fields.category)
            .bind(&fields.origin)
            .bind(fields.price)
            .bind(&fields.made_by)
            .bind(fields.quantity)
            .bind(&fields.details)
            .execute(self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }
}

/// Escape LIKE/ILIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
