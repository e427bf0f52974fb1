//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use food_villa_core::FoodId;

use crate::db::{FoodFilter, FoodRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::ensure_owner;
use crate::middleware::{Authenticated, RequireOwner};
use crate::models::{FoodItem, FoodItemUpdate, NewFoodItem};
use crate::state::AppState;

/// Query parameters for `GET /foods`.
#[derive(Debug, Deserialize)]
pub struct FoodListQuery {
    /// Case-insensitive substring match on the item name.
    pub search: Option<String>,
}

/// Result of a field replace.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub updated: u64,
}

/// List catalog items, optionally filtered by a name substring.
///
/// GET /foods?search=piz
///
/// # Errors
///
/// Returns a store error if the listing fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FoodListQuery>,
) -> Result<Json<Vec<FoodItem>>> {
    let filter = match query.search {
        Some(needle) if !needle.is_empty() => FoodFilter::NameContains(needle),
        _ => FoodFilter::All,
    };

    let items = FoodRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(items))
}

/// List the catalog sorted by purchase count, best sellers first.
///
/// GET /top-foods
///
/// # Errors
///
/// Returns a store error if the listing fails.
pub async fn top(State(state): State<AppState>) -> Result<Json<Vec<FoodItem>>> {
    let items = FoodRepository::new(state.pool())
        .top_by_purchase_count()
        .await?;
    Ok(Json(items))
}

/// List the items the authenticated user added.
///
/// GET /myFood?email=...  (guarded: token must match the email parameter)
///
/// # Errors
///
/// Returns a store error if the listing fails.
pub async fn mine(
    State(state): State<AppState>,
    RequireOwner(identity): RequireOwner,
) -> Result<Json<Vec<FoodItem>>> {
    let items = FoodRepository::new(state.pool())
        .list(&FoodFilter::AdderEmail(identity.email))
        .await?;
    Ok(Json(items))
}

/// Get a single catalog item.
///
/// GET /single-food/{id}
///
/// # Errors
///
/// Returns `AppError::NotFound` if the id does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<FoodId>,
) -> Result<Json<FoodItem>> {
    let item = FoodRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("food {id}")))?;
    Ok(Json(item))
}

/// Insert a new catalog item.
///
/// POST /added  (guarded: token must match `adder_email`)
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the token identity is not the
/// declared adder, or a store error if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Json(item): Json<NewFoodItem>,
) -> Result<(StatusCode, Json<FoodItem>)> {
    ensure_owner(&identity, item.adder_email.as_str())?;

    let inserted = FoodRepository::new(state.pool()).insert(&item).await?;
    Ok((StatusCode::CREATED, Json(inserted)))
}

/// Replace the mutable fields of an item the authenticated user added.
///
/// PUT /update/{id}  (guarded: token must match the item's `adder_email`)
///
/// A missing id is a no-op (`updated: 0`), not an error.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the item belongs to someone else, or
/// a store error if the update fails.
pub async fn update(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<FoodId>,
    Json(fields): Json<FoodItemUpdate>,
) -> Result<Json<UpdateResponse>> {
    let repo = FoodRepository::new(state.pool());

    let Some(existing) = repo.get(id).await? else {
        return Ok(Json(UpdateResponse { updated: 0 }));
    };
    ensure_owner(&identity, existing.adder_email.as_str())?;

    let updated = repo.replace_fields(id, &fields).await?;
    Ok(Json(UpdateResponse { updated }))
}
