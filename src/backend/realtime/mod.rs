//! Real-time Delivery Module
//!
//! This module owns the live WebSocket side of the server: which users
//! are connected right now and how frames reach them.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── registry.rs     - User -> connection map and best-effort send
//! └── socket.rs       - `/ws` upgrade, writer task and read loop
//! ```
//!
//! # Delivery
//!
//! `ConnectionRegistry::send` never blocks on the network. It enqueues a
//! serialized frame onto the recipient's bounded outbound queue and
//! reports a `DeliveryOutcome`. A full or closed queue evicts the
//! connection.
//!
//! # Example
//!
//! ```rust
//! use xfchat::backend::realtime::{Connection, ConnectionRegistry, DeliveryOutcome};
//!
//! let registry = ConnectionRegistry::new();
//! assert_eq!(registry.send("bob", &"hi"), DeliveryOutcome::Offline);
//!
//! let (connection, mut outbound) = Connection::open(8);
//! registry.register("bob", connection);
//! assert_eq!(registry.send("bob", &"hi"), DeliveryOutcome::Delivered);
//! assert_eq!(outbound.rx.try_recv().unwrap(), "\"hi\"");
//! ```

/// Connection registry
pub mod registry;

/// WebSocket handler
pub mod socket;

pub use registry::{Connection, ConnectionId, ConnectionRegistry, DeliveryOutcome, Outbound};
pub use socket::{handle_websocket, WsParams};
