//! Service layer: token issuance/verification and the purchase workflow.

pub mod purchase;
pub mod token;

pub use purchase::PurchaseError;
pub use token::{AuthError, TokenService};
