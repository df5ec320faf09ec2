/**
 * Backend Error Types
 *
 * This module defines the error types used between the stores, the
 * domain services and the HTTP boundary.
 *
 * # Error Types
 *
 * - `StoreError` - Failures reported by a persistence adapter
 * - `ErrorKind` - Machine-readable category carried in every error response
 * - `BackendError` - The boundary error returned from handlers
 *
 * # Error Categories
 *
 * ## Caller Errors
 *
 * Detected before any persistence happens:
 * - `validation` - Malformed or incomplete payload
 * - `unauthorized` - Missing or invalid bearer token
 * - `forbidden` - The token's principal does not match the acting user
 *
 * ## Domain Outcomes
 *
 * Descriptive, non-retryable results of the state machines:
 * - `not_found` - A referenced user or message does not exist
 * - `conflict` - The requested transition is illegal from the current state
 * - `no_changes` - A guarded update matched nothing
 *
 * ## Infrastructure
 *
 * - `storage` - Store or other infrastructure failure, the only retryable kind
 */

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::SharedError;

/// Errors reported by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("record already exists")]
    Duplicate,

    /// The database rejected or failed the query
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// A stored row could not be mapped back into a record
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            StoreError::Duplicate
        } else {
            StoreError::Database(err)
        }
    }
}

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    NoChanges,
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NoChanges => "no_changes",
            ErrorKind::Storage => "storage",
        }
    }

    /// HTTP status code for this kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::NoChanges => StatusCode::CONFLICT,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether a client may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Storage)
    }
}

/// Backend error returned from HTTP handlers
///
/// Every variant carries a human-readable message; the kind decides the
/// status code and the `kind` field of the response envelope.
///
/// # Usage
///
/// ```rust
/// use xfchat::backend::error::BackendError;
///
/// let err = BackendError::not_found("recipient does not exist");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    NoChanges { message: String },

    /// Infrastructure failure; the source is logged, not returned
    #[error("storage error: {source}")]
    Storage {
        #[source]
        source: StoreError,
    },

    /// Infrastructure failure outside the stores
    #[error("internal error: {message}")]
    Internal { message: String },

    /// Shared validation error
    #[error(transparent)]
    Shared(#[from] SharedError),
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict { message: message.into() }
    }

    pub fn no_changes(message: impl Into<String>) -> Self {
        Self::NoChanges { message: message.into() }
    }

    pub fn storage(source: StoreError) -> Self {
        Self::Storage { source }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Machine-readable category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::Shared(_) => ErrorKind::Validation,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NoChanges { .. } => ErrorKind::NoChanges,
            Self::Storage { .. } | Self::Internal { .. } => ErrorKind::Storage,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// Message safe to return to a client
    ///
    /// Storage errors are reduced to a generic message so database details
    /// never leave the server.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::NoChanges { message } => message.clone(),
            Self::Storage { .. } => "storage unavailable, please retry".to_string(),
            Self::Internal { .. } => "internal server error".to_string(),
            Self::Shared(err) => match err {
                SharedError::ValidationError { message, .. } => message.clone(),
                other => other.to_string(),
            },
        }
    }
}
