//! Authentication API integration tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_signup_then_login() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "username": "dave", "email": "dave@example.com", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "dave");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = app
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "dave", "password": "password123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, me) = app.request(Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["email"], "dave@example.com");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "username": "alice", "email": "other@example.com", "password": "password123" })),
        )
        .await;
    let body = assert_failure!(response, StatusCode::CONFLICT, "conflict");
    assert_eq!(body["message"], "username already taken");
}

#[tokio::test]
async fn test_signup_invalid_username() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "username": "no spaces", "email": "x@example.com", "password": "password123" })),
        )
        .await;
    assert_failure!(response, StatusCode::BAD_REQUEST, "validation");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new().await;

    let unknown = app
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "nobody", "password": "password123" })),
        )
        .await;
    assert_failure!(unknown, StatusCode::UNAUTHORIZED, "unauthorized");

    // seeded accounts carry no password
    let seeded = app
        .request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "" })),
        )
        .await;
    assert_failure!(seeded, StatusCode::UNAUTHORIZED, "unauthorized");
}

#[tokio::test]
async fn test_bad_tokens_are_rejected() {
    let app = TestApp::new().await;

    let missing = app.request(Method::GET, "/auth/me", None, None).await;
    assert_failure!(missing, StatusCode::UNAUTHORIZED, "unauthorized");

    let garbage = app.request(Method::GET, "/auth/me", Some("garbage"), None).await;
    assert_failure!(garbage, StatusCode::UNAUTHORIZED, "unauthorized");

    let foreign = xfchat::backend::auth::TokenSecret::new("another-secret")
        .issue("alice")
        .unwrap();
    let forged = app.request(Method::GET, "/auth/me", Some(&foreign), None).await;
    assert_failure!(forged, StatusCode::UNAUTHORIZED, "unauthorized");
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["onlineConnections"], 0);
    assert_eq!(body["data"]["storage"], "memory");

    let missing = app.request(Method::GET, "/nope", None, None).await;
    assert_failure!(missing, StatusCode::NOT_FOUND, "not_found");
}
