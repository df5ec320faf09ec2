//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types are what travels over the REST
//! API and the WebSocket channel, so every one of them is serializable.
//!
//! # Overview
//!
//! The shared module provides transport-agnostic types that can be used
//! in both server and client code. Nothing in here touches storage or
//! the network.

/// Real-time frames pushed over the WebSocket
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Message and contact records plus request bodies
pub mod messaging;

/// JSON envelope for REST responses
pub mod response;

/// Re-export commonly used types for convenience
pub use event::{ServerFrame, DeleteAck};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use response::ApiResponse;
