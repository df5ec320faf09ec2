//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-memory application with seeded users
//! - Request helpers that return the decoded JSON envelope
//! - Custom assertion macros

#[macro_use]
pub mod assertions;
pub mod fixtures;

pub use fixtures::*;
