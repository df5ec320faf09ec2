//! Backend Module
//!
//! This module contains all server-side code for xfchat. It provides an
//! Axum HTTP + WebSocket server for direct messaging and contacts.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - The connection registry and the `/ws` accept loop
//! - The message dispatcher (persist, then deliver)
//! - The contact state machine
//! - Authentication and user management
//! - Database persistence (PostgreSQL) with in-memory fallbacks
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`realtime`** - Connection registry and WebSocket handler
//! - **`messaging`** - Message stores, dispatcher and handlers
//! - **`contacts`** - Contact stores, state machine and handlers
//! - **`auth`** - Authentication, JWT tokens, user management
//! - **`middleware`** - Request authentication
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── realtime/       - Connection registry and `/ws`
//! ├── messaging/      - Direct messages
//! ├── contacts/       - Contact relationships
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! POST /message/sent
//!   -> AuthUser (bearer token, principal = senderId)
//!   -> MessageDispatcher::send
//!        -> MessageStore::insert
//!        -> ConnectionRegistry::send -> recipient's outbound queue -> writer task
//!   <- { success, message, data: { ...message, delivery } }
//! ```

/// Server initialization and state management
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Request middleware
pub mod middleware;

/// Connection registry and WebSocket handler
pub mod realtime;

/// Direct messages
pub mod messaging;

/// Contact relationships
pub mod contacts;
