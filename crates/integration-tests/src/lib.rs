//! Shared helpers for Food Villa integration tests.
//!
//! The tests exercise the router and the access guard without a live
//! database: the pool is created lazily and never connects, so only routes
//! that stop before store access can be driven end-to-end here. That covers
//! the whole auth surface - token issuance, cookie attributes, and every
//! guard rejection path.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use axum::Router;
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;

use food_villa_server::config::{Environment, ServerConfig};
use food_villa_server::routes;
use food_villa_server::state::AppState;

/// Signing secret used across the test suite.
pub const TEST_SECRET: &str = "k9#mQ2$vX7!pL4@wR8&nT3*zD6^aF1%s";

/// Build a config for tests; the database URL points nowhere.
#[must_use]
pub fn test_config(environment: Environment) -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("postgres://localhost:1/unreachable"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        token_secret: SecretString::from(TEST_SECRET),
        environment,
        allowed_origins: vec![],
        sentry_dsn: None,
    }
}

/// Build application state with a lazy pool that never connects.
#[must_use]
pub fn test_state(environment: Environment) -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost:1/unreachable")
        .unwrap();
    AppState::new(test_config(environment), pool)
}

/// The full API router wired to test state.
#[must_use]
pub fn app(environment: Environment) -> Router {
    routes::routes().with_state(test_state(environment))
}
