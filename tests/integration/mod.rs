//! Integration tests
//!
//! HTTP tests drive the router in-process; the WebSocket tests bind a
//! real listener on an ephemeral port.

mod auth_test;
mod contacts_test;
mod messages_test;
mod websocket_test;
