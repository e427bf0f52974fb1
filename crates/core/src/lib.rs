//! Food Villa Core - Shared types library.
//!
//! This crate provides common types used across the Food Villa components:
//! - `server` - The marketplace HTTP API
//! - `integration-tests` - Logic-level integration tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
