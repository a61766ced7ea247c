//! Bearer token integration tests.

use axum::http::StatusCode;

use purchase_auth::JwtEncoder;
use purchase_core::config::AuthConfig;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_header_is_rejected() {
    let app = TestApp::new();
    let response = app.request("GET", "/purchase/api/", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "empty auth header");
}

#[tokio::test]
async fn test_non_bearer_header_is_rejected() {
    let app = TestApp::new();
    let response = app
        .raw_request_with_header("GET", "/comment/api/", "Basic dXNlcjpwYXNz")
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid auth header");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/purchase/api/", None, Some("not.a.token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid token");
}

#[tokio::test]
async fn test_foreign_signature_is_rejected() {
    let app = TestApp::new();
    let foreign = JwtEncoder::new(&AuthConfig {
        jwt_secret: "someone-else".to_string(),
        ..app.config.auth.clone()
    })
    .issue("intruder")
    .unwrap();

    let response = app
        .request("GET", "/purchase/api/", None, Some(&foreign))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid token");
}

#[tokio::test]
async fn test_valid_token_reaches_handler() {
    let app = TestApp::new();
    let response = app.authed("GET", "/purchase/api/", None).await;

    // Authenticated, but the store is empty.
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
