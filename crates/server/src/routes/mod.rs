//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                    - Greeting
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (store probe)
//!
//! # Catalog
//! GET    /foods               - List items, optional ?search= substring
//! GET    /top-foods           - Items sorted by purchase_count desc
//! GET    /single-food/{id}    - Single item
//! GET    /myFood              - Items added by ?email= (guarded)
//! POST   /added               - Insert an item (guarded, owner = adder_email)
//! PUT    /update/{id}         - Replace an item's mutable fields (guarded)
//!
//! # Ledger
//! GET    /myPurchasedFood     - Purchases by ?email= (guarded)
//! POST   /purchase            - Record a purchase (guarded, owner = Buyer_email)
//! DELETE /delete/{id}         - Delete a purchase (guarded)
//!
//! # Feedback
//! GET    /feedbacks           - List feedback
//! POST   /feedback            - Leave feedback
//!
//! # Auth
//! POST   /jwt                 - Issue a token, set the auth cookie
//! GET    /logOut              - Clear the auth cookie
//! ```
//!
//! Every owner-scoped or mutating route carries the access guard; the
//! public catalog and feedback reads are deliberately unauthenticated.

pub mod auth;
pub mod feedback;
pub mod foods;
pub mod purchases;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Greeting kept from the first deployment of the service.
async fn home() -> &'static str {
    "hello from food villa server"
}

/// Create all routes for the marketplace API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        // Catalog
        .route("/foods", get(foods::list))
        .route("/top-foods", get(foods::top))
        .route("/single-food/{id}", get(foods::show))
        .route("/myFood", get(foods::mine))
        .route("/added", post(foods::create))
        .route("/update/{id}", put(foods::update))
        // Ledger
        .route("/myPurchasedFood", get(purchases::mine))
        .route("/purchase", post(purchases::create))
        .route("/delete/{id}", delete(purchases::remove))
        // Feedback
        .route("/feedbacks", get(feedback::list))
        .route("/feedback", post(feedback::create))
        // Auth
        .route("/jwt", post(auth::issue_token))
        .route("/logOut", get(auth::logout))
}
