//! Catalog food item models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use food_villa_core::{Email, FoodId};

/// A food item in the catalog.
///
/// `id` is assigned by the store on insertion and immutable thereafter.
/// `quantity` and `purchase_count` are mutated only by the purchase
/// transaction or by an explicit owner update (quantity only).
#[derive(Debug, Clone, Serialize)]
pub struct FoodItem {
    pub id: FoodId,
    pub name: String,
    pub image: String,
    pub category: String,
    pub origin: String,
    pub price: Decimal,
    pub made_by: String,
    pub quantity: i32,
    pub details: String,
    pub adder_email: Email,
    pub purchase_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new food item (`POST /added`).
///
/// `purchase_count` starts at 0 regardless of what the caller sends; the
/// field is not accepted on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewFoodItem {
    pub name: String,
    pub image: String,
    pub category: String,
    pub origin: String,
    pub price: Decimal,
    pub made_by: String,
    pub quantity: i32,
    pub details: String,
    pub adder_email: Email,
}

/// Payload for a full field replace (`PUT /update/{id}`).
///
/// Overwrites exactly the mutable fields; id, `adder_email` and
/// `purchase_count` are never touched.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoodItemUpdate {
    pub name: String,
    pub image: String,
    pub category: String,
    pub origin: String,
    pub price: Decimal,
    pub made_by: String,
    pub quantity: i32,
    pub details: String,
}
