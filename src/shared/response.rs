//! Response Envelope
//!
//! Every REST response body, success or failure, has the same shape:
//!
//! ```json
//! { "success": false, "message": "recipient does not exist", "kind": "not_found" }
//! { "success": true, "message": "Message sent successfully", "data": { ... } }
//! ```

use serde::{Deserialize, Serialize};

/// JSON envelope wrapping every REST response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    /// Machine-readable error kind, present on failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            kind: None,
            data: Some(data),
        }
    }

    /// Failed response
    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            kind: Some(kind.into()),
            data: None,
        }
    }
}
