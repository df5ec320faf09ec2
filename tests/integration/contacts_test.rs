//! Contact API integration tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{TestApp, TEST_SECRET};

async fn add(app: &TestApp, from: &str, to: &str, status: &str) -> (StatusCode, Value) {
    app.as_user(
        from,
        Method::POST,
        "/contact/add",
        Some(json!({ "fromUserId": from, "toUserId": to, "status": status })),
    )
    .await
}

async fn action(app: &TestApp, user: &str, contact: &str, action: &str) -> (StatusCode, Value) {
    app.as_user(
        user,
        Method::POST,
        "/contact/action",
        Some(json!({ "userId": user, "contactId": contact, "action": action })),
    )
    .await
}

#[tokio::test]
async fn test_pending_twice_keeps_one_record() {
    let app = TestApp::new().await;

    let (status, first) = add(&app, "alice", "bob", "pending").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "Contact request sent successfully");
    assert_eq!(first["data"]["changed"], true);

    let (status, second) = add(&app, "alice", "bob", "pending").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "contact request already in pending state");
    assert_eq!(second["data"]["changed"], false);

    let (_, listing) = app
        .as_user("alice", Method::GET, "/contact/get?username=alice", None)
        .await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_block_then_remove_is_not_connected() {
    let app = TestApp::new().await;
    add(&app, "alice", "bob", "pending").await;
    let (_, accepted) = add(&app, "alice", "bob", "accepted").await;
    assert_eq!(accepted["data"]["status"], "accepted");

    let (status, blocked) = action(&app, "alice", "bob", "block").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blocked["data"]["status"], "blocked");

    let response = action(&app, "alice", "bob", "remove").await;
    let body = assert_failure!(response, StatusCode::CONFLICT, "conflict");
    assert_eq!(body["message"], "cannot block or remove, contact is not connected");
}

#[tokio::test]
async fn test_accept_without_record_inserts() {
    let app = TestApp::new().await;

    let (status, body) = add(&app, "alice", "bob", "accepted").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact request accepted as a new entry");

    let (_, again) = add(&app, "alice", "bob", "accepted").await;
    assert_eq!(again["message"], "contact request already accepted");
}

#[tokio::test]
async fn test_accept_without_record_can_be_disabled() {
    let config = xfchat::shared::AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .accept_creates_entry(false)
        .build()
        .unwrap();
    let app = TestApp::with_config(config).await;

    let response = add(&app, "alice", "bob", "accepted").await;
    assert_failure!(response, StatusCode::CONFLICT, "no_changes");
}

#[tokio::test]
async fn test_rejected_cannot_be_accepted() {
    let app = TestApp::new().await;
    add(&app, "alice", "bob", "pending").await;
    add(&app, "alice", "bob", "rejected").await;

    let response = add(&app, "alice", "bob", "accepted").await;
    let body = assert_failure!(response, StatusCode::CONFLICT, "conflict");
    assert_eq!(body["message"], "already rejected, cannot accept");
}

#[tokio::test]
async fn test_reject_without_record_changes_nothing() {
    let app = TestApp::new().await;

    let response = add(&app, "alice", "bob", "rejected").await;
    assert_failure!(response, StatusCode::CONFLICT, "no_changes");

    let (_, listing) = app
        .as_user("alice", Method::GET, "/contact/get?username=alice&scope=all", None)
        .await;
    assert!(listing["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_recipient_and_bad_status() {
    let app = TestApp::new().await;

    let missing = add(&app, "alice", "zed", "pending").await;
    assert_failure!(missing, StatusCode::NOT_FOUND, "not_found");

    let bad = add(&app, "alice", "bob", "friends").await;
    let body = assert_failure!(bad, StatusCode::BAD_REQUEST, "validation");
    assert_contains!(body["message"].as_str().unwrap(), "friends");

    let own = add(&app, "alice", "alice", "pending").await;
    assert_failure!(own, StatusCode::BAD_REQUEST, "validation");
}

#[tokio::test]
async fn test_block_requires_accepted() {
    let app = TestApp::new().await;
    add(&app, "alice", "bob", "pending").await;

    let response = action(&app, "alice", "bob", "block").await;
    assert_failure!(response, StatusCode::CONFLICT, "conflict");

    let (_, listing) = app
        .as_user("alice", Method::GET, "/contact/get?username=alice", None)
        .await;
    assert_eq!(listing["data"][0]["status"], "pending");
}

#[tokio::test]
async fn test_listing_scope() {
    let app = TestApp::new().await;
    add(&app, "alice", "bob", "pending").await;
    add(&app, "carol", "alice", "pending").await;

    let (_, outbound) = app
        .as_user("alice", Method::GET, "/contact/get?username=alice", None)
        .await;
    assert_eq!(outbound["data"].as_array().unwrap().len(), 1);

    let (_, all) = app
        .as_user("alice", Method::GET, "/contact/get?username=alice&scope=all", None)
        .await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let other = app
        .as_user("bob", Method::GET, "/contact/get?username=alice", None)
        .await;
    assert_failure!(other, StatusCode::FORBIDDEN, "forbidden");

    let bad_scope = app
        .as_user("alice", Method::GET, "/contact/get?username=alice&scope=everyone", None)
        .await;
    assert_failure!(bad_scope, StatusCode::BAD_REQUEST, "validation");
}
