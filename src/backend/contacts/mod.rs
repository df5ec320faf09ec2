//! Contacts Module
//!
//! Directional contact relationships between users and the state machine
//! that governs them.
//!
//! # Module Structure
//!
//! ```text
//! contacts/
//! ├── transition.rs - Pure transition table
//! ├── store.rs      - `ContactStore` trait and the in-memory store
//! ├── db.rs         - PostgreSQL `ContactStore`
//! ├── machine.rs    - `ContactStateMachine`
//! └── handlers.rs   - `/contact/*` routes
//! ```
//!
//! # Status Flow
//!
//! ```text
//! (none) --pending--> pending --accepted--> accepted --block--> blocked
//!                        |                     |
//!                        +--rejected--> rejected +--remove--> removed
//! ```

pub mod db;
pub mod handlers;
pub mod machine;
pub mod store;
pub mod transition;

pub use handlers::*;
pub use machine::{ContactError, ContactOutcome, ContactStateMachine};
pub use store::{ContactStore, InMemoryContactStore, UpsertOutcome};
pub use transition::{next_action_state, next_state, ConflictReason, NoOpReason, Transition};
