//! Message API integration tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use xfchat::backend::realtime::Connection;

use crate::common::TestApp;

#[tokio::test]
async fn test_send_to_offline_recipient_persists() {
    let app = TestApp::new().await;

    let (status, body) = app
        .as_user(
            "alice",
            Method::POST,
            "/message/sent",
            Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "hi" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Message sent successfully");
    assert_eq!(body["data"]["status"], "sent");
    assert_eq!(body["data"]["delivery"], "offline");
    assert!(body["data"]["id"].is_string());

    let (status, body) = app
        .as_user("alice", Method::GET, "/message/get?username=alice&recipient=bob", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"], "hi");
}

#[tokio::test]
async fn test_send_reaches_registered_recipient() {
    let app = TestApp::new().await;
    let (connection, mut outbound) = Connection::open(8);
    app.state.registry.register("bob", connection);

    let (_, body) = app
        .as_user(
            "alice",
            Method::POST,
            "/message/sent",
            Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "hi2" })),
        )
        .await;
    assert_eq!(body["data"]["delivery"], "delivered");

    let frame: serde_json::Value = serde_json::from_str(&outbound.rx.try_recv().unwrap()).unwrap();
    assert_eq!(frame["type"], "message");
    assert_eq!(frame["content"], "hi2");
    assert_eq!(frame["senderId"], "alice");
}

#[tokio::test]
async fn test_send_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/message/sent",
            None,
            Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "hi" })),
        )
        .await;
    assert_failure!(response, StatusCode::UNAUTHORIZED, "unauthorized");
}

#[tokio::test]
async fn test_send_as_someone_else_is_forbidden() {
    let app = TestApp::new().await;

    let response = app
        .as_user(
            "mallory",
            Method::POST,
            "/message/sent",
            Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "hi" })),
        )
        .await;
    assert_failure!(response, StatusCode::FORBIDDEN, "forbidden");
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .as_user(
            "alice",
            Method::POST,
            "/message/sent",
            Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "" })),
        )
        .await;
    assert_failure!(response, StatusCode::BAD_REQUEST, "validation");
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .as_user("alice", Method::POST, "/message/sent", Some(json!({ "senderId": 7 })))
        .await;
    assert_failure!(response, StatusCode::BAD_REQUEST, "validation");
}

#[tokio::test]
async fn test_edit_and_delete_flow() {
    let app = TestApp::new().await;
    let (_, sent) = app
        .as_user(
            "alice",
            Method::POST,
            "/message/sent",
            Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "draft" })),
        )
        .await;
    let id = sent["data"]["id"].as_str().unwrap().to_string();

    // bob cannot edit alice's message even with his own identity in the body
    let response = app
        .as_user(
            "bob",
            Method::PATCH,
            "/message/edit",
            Some(json!({ "id": id, "fromUserId": "bob", "toUserId": "alice", "newText": "hacked" })),
        )
        .await;
    assert_failure!(response, StatusCode::NOT_FOUND, "not_found");

    let (status, edited) = app
        .as_user(
            "alice",
            Method::PATCH,
            "/message/edit",
            Some(json!({ "id": id, "fromUserId": "alice", "toUserId": "bob", "newText": "final" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["data"]["content"], "final");
    assert_eq!(edited["data"]["status"], "edited");

    let (status, deleted) = app
        .as_user(
            "alice",
            Method::DELETE,
            "/message/delete",
            Some(json!({ "id": id, "fromUserId": "alice", "toUserId": "bob" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"], id.as_str());

    let (_, history) = app
        .as_user("bob", Method::GET, "/message/get?username=alice&recipient=bob", None)
        .await;
    assert_eq!(history["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_conversation_returns_both_directions() {
    let app = TestApp::new().await;
    for (from, to, text) in [("alice", "bob", "one"), ("bob", "alice", "two"), ("alice", "carol", "other")] {
        let (status, _) = app
            .as_user(
                from,
                Method::POST,
                "/message/sent",
                Some(json!({ "senderId": from, "recipientId": to, "content": text })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app
        .as_user("bob", Method::GET, "/message/conversation?username=bob&recipient=alice", None)
        .await;
    let contents: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["one", "two"]);

    let outsider = app
        .as_user("carol", Method::GET, "/message/conversation?username=bob&recipient=alice", None)
        .await;
    assert_failure!(outsider, StatusCode::FORBIDDEN, "forbidden");
}

#[tokio::test]
async fn test_history_requires_both_parameters() {
    let app = TestApp::new().await;
    let response = app
        .as_user("alice", Method::GET, "/message/get?username=alice", None)
        .await;
    let body = assert_failure!(response, StatusCode::BAD_REQUEST, "validation");
    assert_contains!(body["message"].as_str().unwrap(), "recipient");
}
