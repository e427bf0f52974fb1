//! Ledger route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use food_villa_core::PurchaseId;

use crate::db::{PurchaseFilter, PurchaseRepository};
use crate::error::Result;
use crate::middleware::auth::ensure_owner;
use crate::middleware::{Authenticated, RequireOwner};
use crate::models::{NewPurchase, Purchase};
use crate::services::purchase;
use crate::state::AppState;

/// Result of a ledger delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// List the authenticated user's purchases.
///
/// GET /myPurchasedFood?email=...  (guarded: token must match the email parameter)
///
/// # Errors
///
/// Returns a store error if the listing fails.
pub async fn mine(
    State(state): State<AppState>,
    RequireOwner(identity): RequireOwner,
) -> Result<Json<Vec<Purchase>>> {
    let entries = PurchaseRepository::new(state.pool())
        .list(&PurchaseFilter::BuyerEmail(identity.email))
        .await?;
    Ok(Json(entries))
}

/// Record a purchase: ledger insert plus inventory counter adjustment in
/// one transaction.
///
/// POST /purchase  (guarded: token must match `Buyer_email`)
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the token identity is not the buyer,
/// a purchase error for a missing item or insufficient stock, or a store
/// error if the transaction fails.
pub async fn create(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Json(new): Json<NewPurchase>,
) -> Result<(StatusCode, Json<Purchase>)> {
    ensure_owner(&identity, new.buyer_email.as_str())?;

    let recorded = purchase::execute(state.pool(), new).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

/// Delete one of the authenticated user's purchases.
///
/// DELETE /delete/{id}  (guarded: token must match the purchase's `Buyer_email`)
///
/// A missing id is a no-op (`deleted: 0`), not an error.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the purchase belongs to someone else,
/// or a store error if the delete fails.
pub async fn remove(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(id): Path<PurchaseId>,
) -> Result<Json<DeleteResponse>> {
    let repo = PurchaseRepository::new(state.pool());

    let Some(existing) = repo.get(id).await? else {
        return Ok(Json(DeleteResponse { deleted: 0 }));
    };
    ensure_owner(&identity, existing.buyer_email.as_str())?;

    let deleted = repo.delete(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}
