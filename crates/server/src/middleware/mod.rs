//! Request middleware: the auth cookie and the access guard extractors.

pub mod auth;
pub mod cookie;

pub use auth::{Authenticated, RequireOwner};
pub use cookie::{AUTH_COOKIE, auth_cookie, clear_auth_cookie, token_from_headers};
