//! Messaging Module
//!
//! This module contains all the data structures for the messaging system:
//!
//! - `DirectMessage` - A message from one user to another
//! - `ContactRelationship` - A directional contact edge with a status
//! - Request bodies for sending, editing and deleting messages and for
//!   driving contact relationships
//!
//! # Usage
//!
//! ```rust
//! use xfchat::shared::messaging::{DirectMessage, ContactRelationship, ContactStatus};
//! ```

pub mod contact;
pub mod message;

// Re-export all types
pub use contact::{
    ContactAction, ContactActionRequest, ContactRelationship, ContactRequest, ContactScope,
    ContactStatus,
};
pub use message::{
    conversation_key, DeleteMessageRequest, DirectMessage, EditMessageRequest, MessageStatus,
    MessageView, SendMessageRequest,
};
