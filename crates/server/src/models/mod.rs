//! Domain models for the marketplace entities.
//!
//! Wire field names follow the original frontend contract (`foodId`,
//! `Buyer_email`, ...) via serde renames; the Rust side stays snake_case.
//! Mutation payloads reject unknown fields at the boundary.

pub mod feedback;
pub mod food;
pub mod identity;
pub mod purchase;

pub use feedback::{Feedback, NewFeedback};
pub use food::{FoodItem, FoodItemUpdate, NewFoodItem};
pub use identity::Identity;
pub use purchase::{NewPurchase, Purchase};
