//! WebSocket end-to-end tests
//!
//! Each test serves the router on an ephemeral port and connects with
//! tokio-tungstenite.

use axum::http::{Method, StatusCode};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::common::TestApp;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn serve(app: &TestApp) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr, query: &str) -> Client {
    let (client, _) = connect_async(format!("ws://{}/ws?{}", addr, query))
        .await
        .expect("websocket handshake");
    client
}

/// Poll until `check` holds or two seconds pass
async fn eventually<F: Fn() -> bool>(check: F) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

async fn next_text(client: &mut Client) -> String {
    let frame = tokio::time::timeout(Duration::from_secs(2), client.next())
        .await
        .expect("frame in time")
        .expect("stream open")
        .expect("valid frame");
    frame.to_text().unwrap().to_string()
}

#[tokio::test]
async fn test_message_is_pushed_to_connected_recipient() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let mut bob = connect(addr, "userID=bob").await;
    eventually(|| app.state.registry.is_online("bob")).await;

    let (status, body) = app
        .as_user(
            "alice",
            Method::POST,
            "/message/sent",
            Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "hi2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["delivery"], "delivered");

    let frame: Value = serde_json::from_str(&next_text(&mut bob).await).unwrap();
    assert_eq!(frame["type"], "message");
    assert_eq!(frame["content"], "hi2");
    assert_eq!(frame["recipientId"], "bob");
}

#[tokio::test]
async fn test_text_frames_are_echoed() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let mut alice = connect(addr, "userID=alice").await;
    alice.send(Message::Text("ping".into())).await.unwrap();
    assert_eq!(next_text(&mut alice).await, "ping");
}

#[tokio::test]
async fn test_second_connection_evicts_first() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    let mut first = connect(addr, "userID=bob").await;
    eventually(|| app.state.registry.is_online("bob")).await;
    let mut second = connect(addr, "userID=bob").await;

    // the first socket is closed by the server
    let ended = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match first.next().await {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await;
    assert!(ended.is_ok(), "first connection was not closed");
    assert_eq!(app.state.registry.online_count(), 1);

    // and pushes now reach the second one
    app.as_user(
        "alice",
        Method::POST,
        "/message/sent",
        Some(json!({ "senderId": "alice", "recipientId": "bob", "content": "to second" })),
    )
    .await;
    let frame: Value = serde_json::from_str(&next_text(&mut second).await).unwrap();
    assert_eq!(frame["content"], "to second");
}

#[tokio::test]
async fn test_disconnect_stamps_last_online() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    app.as_user(
        "alice",
        Method::POST,
        "/contact/add",
        Some(json!({ "fromUserId": "alice", "toUserId": "bob", "status": "pending" })),
    )
    .await;

    let mut bob = connect(addr, "userID=bob").await;
    eventually(|| app.state.registry.is_online("bob")).await;
    bob.close(None).await.unwrap();
    eventually(|| !app.state.registry.is_online("bob")).await;

    let mut stamped = false;
    for _ in 0..200 {
        let (_, listing) = app
            .as_user("alice", Method::GET, "/contact/get?username=alice", None)
            .await;
        if listing["data"][0]["lastOnline"].is_string() {
            stamped = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(stamped, "lastOnline was not recorded");
}

#[tokio::test]
async fn test_upgrade_requires_user_id() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;

    match connect_async(format!("ws://{}/ws", addr)).await {
        Err(tungstenite::Error::Http(response)) => {
            assert_eq!(response.status().as_u16(), 400);
        }
        other => panic!("expected HTTP 400, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_upgrade_token_must_match_user() {
    let app = TestApp::new().await;
    let addr = serve(&app).await;
    let token = app.token("alice");

    match connect_async(format!("ws://{}/ws?userID=bob&token={}", addr, token)).await {
        Err(tungstenite::Error::Http(response)) => {
            assert_eq!(response.status().as_u16(), 403);
        }
        other => panic!("expected HTTP 403, got {:?}", other.map(|_| ())),
    }

    let _alice = connect(addr, &format!("userID=alice&token={}", token)).await;
    eventually(|| app.state.registry.is_online("alice")).await;
}
