//! Application fixtures
//!
//! Builds the full router over in-memory stores so the HTTP surface can
//! be exercised with `tower::ServiceExt::oneshot`, no database needed.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use xfchat::backend::auth::User;
use xfchat::backend::server::{create_in_memory_app, AppState};
use xfchat::shared::AppConfig;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Users present in every fresh `TestApp`
pub const SEEDED_USERS: [&str; 3] = ["alice", "bob", "carol"];

/// Test configuration with a fixed secret
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .outbound_queue_capacity(16)
        .build()
        .expect("test config is valid")
}

/// The application under test
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// In-memory app with `SEEDED_USERS` registered
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let app = create_in_memory_app(&config);
        for name in SEEDED_USERS {
            app.state
                .users
                .create(&User::new(name, format!("{}@example.com", name), ""))
                .await
                .expect("seed user");
        }
        Self {
            router: app.router,
            state: app.state,
        }
    }

    /// A valid bearer token for `username`
    pub fn token(&self, username: &str) -> String {
        self.state.token_secret.issue(username).expect("issue token")
    }

    /// Send a request and decode the JSON envelope
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        (status, json)
    }

    /// Authenticated request as `user`
    pub async fn as_user(
        &self,
        user: &str,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = self.token(user);
        self.request(method, uri, Some(&token), body).await
    }
}
