//! Integration tests for token issuance and the auth cookie.
//!
//! These drive the real router via `tower::ServiceExt::oneshot`; the
//! `/jwt` and `/logOut` routes never touch the store, so no database is
//! required.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use cookie::{Cookie, SameSite};
use secrecy::SecretString;
use tower::ServiceExt;

use food_villa_core::Email;
use food_villa_integration_tests::{TEST_SECRET, app};
use food_villa_server::config::Environment;
use food_villa_server::models::Identity;
use food_villa_server::services::TokenService;

async fn issue_cookie(environment: Environment, email: &str) -> Cookie<'static> {
    let response = app(environment)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/jwt")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(r#"{{"email":"{email}"}}"#)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    Cookie::parse(set_cookie).unwrap().into_owned()
}

// =============================================================================
// Issuance
// =============================================================================

#[tokio::test]
async fn test_jwt_sets_verifiable_token_cookie() {
    let cookie = issue_cookie(Environment::Development, "a@x.com").await;

    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert_eq!(cookie.max_age(), Some(cookie::time::Duration::days(7)));

    // The cookie value is a token that round-trips through verification
    let tokens = TokenService::new(&SecretString::from(TEST_SECRET));
    let identity = tokens.verify(cookie.value()).unwrap();
    assert_eq!(identity, Identity::new(Email::parse("a@x.com").unwrap()));
}

#[tokio::test]
async fn test_jwt_cookie_production_attributes() {
    let cookie = issue_cookie(Environment::Production, "a@x.com").await;

    // Cross-site frontend in production: Secure + SameSite=None
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::None));
    assert_eq!(cookie.http_only(), Some(true));
}

#[tokio::test]
async fn test_jwt_rejects_malformed_identity() {
    let response = app(Environment::Development)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/jwt")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"not-an-email"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Email parsing fails inside Json<Identity> extraction
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_cookie() {
    let response = app(Environment::Development)
        .oneshot(
            Request::builder()
                .uri("/logOut")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    let cookie = Cookie::parse(set_cookie).unwrap();

    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(cookie::time::Duration::ZERO));
}
