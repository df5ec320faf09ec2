//! Shared Error Types
//!
//! This module defines error types that are shared between the server and
//! its clients. They cover failures that can be detected from a payload
//! alone, before any store is consulted.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A field failed validation
//! - `InvalidStatus` - A contact status or action outside the closed set
//!
//! # Usage
//!
//! ```rust
//! use xfchat::shared::error::SharedError;
//!
//! let error = SharedError::validation("recipientId", "recipient must not be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur on either side of the wire
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A status or action string that is not part of the closed set
    #[error("invalid {what} provided: {value}")]
    InvalidStatus {
        /// Which enumeration was being parsed ("status" or "action")
        what: &'static str,
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-status error
    pub fn invalid_status(what: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            what,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
