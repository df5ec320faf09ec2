//! XFChat - Main Library
//!
//! XFChat is a direct-messaging backend built with Rust: users exchange
//! text/media messages and manage directional contact relationships, and
//! messages are pushed in real time to recipients holding a live WebSocket.
//!
//! # Overview
//!
//! This library provides:
//! - A connection registry tracking one live WebSocket per user
//! - A message dispatcher that persists first and then delivers best-effort
//! - A contact-relationship state machine (pending, accepted, rejected,
//!   blocked, removed) with an explicit transition table
//! - PostgreSQL and in-memory store implementations
//! - An Axum HTTP + WebSocket server wiring it all together
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared by the server and its clients
//!   - Message and contact records, request bodies, WebSocket frames
//!   - Configuration and shared error types
//!
//! - **`backend`** - Server-side code
//!   - Connection registry and WebSocket accept loop
//!   - Message dispatcher and contact state machine
//!   - Store traits with PostgreSQL and in-memory implementations
//!   - Routes, authentication extractor, error-to-response conversion
//!
//! # Usage
//!
//! ```rust,no_run
//! use xfchat::backend::server::init::create_app;
//! use xfchat::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await;
//! // Serve `app.router` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Delivery Guarantees
//!
//! A message reported as sent is durably persisted. Real-time delivery is a
//! best-effort side effect: a recipient who is offline when a message is
//! sent, edited or deleted misses the push and must re-fetch it.
//!
//! # Thread Safety
//!
//! - The registry map sits behind a single mutex held only for map mutation
//!   and a non-blocking enqueue; socket writes happen in per-connection tasks
//! - Stores are `Send + Sync` trait objects shared through `Arc`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
