//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - `StoreError`, `ErrorKind`, `BackendError` and constructors
//! - **`conversion`** - Domain error conversions and `IntoResponse`
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Layering
//!
//! Stores return `StoreError`. The dispatcher and the contact state machine
//! wrap it in `DispatchError` and `ContactError`, which carry domain
//! outcomes such as "not found" or a conflict reason. Handlers convert
//! everything into `BackendError` with `?`, and `BackendError` renders the
//! JSON envelope.
//!
//! # Example
//!
//! ```rust,no_run
//! use xfchat::backend::error::BackendError;
//! use xfchat::shared::ApiResponse;
//!
//! async fn handler() -> Result<ApiResponse<()>, BackendError> {
//!     Err(BackendError::validation("username is required"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, ErrorKind, StoreError};
