//! Messaging Module
//!
//! This module handles direct messages: persistence, real-time delivery
//! and the REST handlers in front of them.
//!
//! # Module Structure
//!
//! ```text
//! messaging/
//! ├── store.rs      - `MessageStore` trait and the in-memory store
//! ├── db.rs         - PostgreSQL `MessageStore`
//! ├── dispatcher.rs - Persist-then-deliver orchestration
//! └── handlers.rs   - `/message/*` routes
//! ```

pub mod db;
pub mod dispatcher;
pub mod handlers;
pub mod store;

pub use dispatcher::{DispatchError, Dispatched, MessageDispatcher};
pub use handlers::*;
pub use store::{InMemoryMessageStore, MessageStore};
