//! Integration tests for the access guard.
//!
//! The guard rejects before any store access happens, so every rejection
//! path (and the pass-through) can be driven against a router whose pool
//! never connects.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{Router, routing::get};
use secrecy::SecretString;
use tower::ServiceExt;

use food_villa_core::Email;
use food_villa_integration_tests::{TEST_SECRET, test_state};
use food_villa_server::config::Environment;
use food_villa_server::middleware::RequireOwner;
use food_villa_server::models::Identity;
use food_villa_server::services::TokenService;

fn token_for(email: &str) -> String {
    TokenService::new(&SecretString::from(TEST_SECRET))
        .issue(&Identity::new(Email::parse(email).unwrap()))
        .unwrap()
}

/// Guarded echo route: returns the verified identity's email.
async fn whoami(RequireOwner(identity): RequireOwner) -> String {
    identity.email.to_string()
}

fn guarded_app() -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .with_state(test_state(Environment::Development))
}

async fn send(app: Router, uri: &str, cookie: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_owned());
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// =============================================================================
// Rejection paths
// =============================================================================

#[tokio::test]
async fn test_no_token_is_unauthorized() {
    let (status, _) = send(guarded_app(), "/whoami?email=a@x.com", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let (status, _) = send(
        guarded_app(),
        "/whoami?email=a@x.com",
        Some("token=garbage"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let forged = TokenService::new(&SecretString::from("b7!nW3@qY9#mK5$xT1&vR8*zC4^dG2%h"))
        .issue(&Identity::new(Email::parse("a@x.com").unwrap()))
        .unwrap();

    let (status, _) = send(
        guarded_app(),
        "/whoami?email=a@x.com",
        Some(&format!("token={forged}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mismatched_email_is_forbidden() {
    let token = token_for("a@x.com");
    let (status, _) = send(
        guarded_app(),
        "/whoami?email=b@x.com",
        Some(&format!("token={token}")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_email_parameter_is_bad_request() {
    let token = token_for("a@x.com");
    let (status, _) = send(guarded_app(), "/whoami", Some(&format!("token={token}"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Pass-through
// =============================================================================

#[tokio::test]
async fn test_matching_token_and_email_passes_identity_through() {
    let token = token_for("a@x.com");
    let (status, body) = send(
        guarded_app(),
        "/whoami?email=a@x.com",
        Some(&format!("token={token}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "a@x.com");
}

// =============================================================================
// Ownership checks on mutating routes
// =============================================================================

#[tokio::test]
async fn test_purchase_for_someone_else_is_forbidden() {
    use food_villa_integration_tests::app;

    let token = token_for("b@x.com");
    let body = r#"{
        "foodId": 1, "Buyer_email": "a@x.com", "quantity": 1,
        "food_name": "Pizza", "food_image": "pizza.png", "price": "9.99"
    }"#;

    let response = app(Environment::Development)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/purchase")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("token={token}"))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    // Rejected on the identity check, before any store access
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_added_for_someone_else_is_forbidden() {
    use food_villa_integration_tests::app;

    let token = token_for("b@x.com");
    let body = r#"{
        "name": "Pizza", "image": "pizza.png", "category": "Italian",
        "origin": "Italy", "price": "9.99", "made_by": "Mario",
        "quantity": 10, "details": "Wood-fired", "adder_email": "a@x.com"
    }"#;

    let response = app(Environment::Development)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/added")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("token={token}"))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mutating_route_without_token_is_unauthorized() {
    use food_villa_integration_tests::app;

    let response = app(Environment::Development)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/purchase")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
