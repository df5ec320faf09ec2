//! Middleware Module
//!
//! This module contains request-processing pieces that run before a
//! handler's body, currently bearer-token authentication.
//!
//! # Example
//!
//! ```rust,no_run
//! use xfchat::backend::middleware::AuthUser;
//!
//! async fn whoami(AuthUser(user): AuthUser) -> String {
//!     user.username
//! }
//! ```

pub mod auth;

pub use auth::{authenticate, authenticate_optional, AuthUser, AuthenticatedUser};
