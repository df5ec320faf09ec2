//! Contact Relationship Data Structure
//!
//! Represents a directional contact edge between two users and the
//! commands that move it between states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::SharedError;

/// Status of a contact relationship
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    /// Request sent, awaiting an answer
    Pending,
    /// Both sides are connected
    Accepted,
    /// Request was turned down
    Rejected,
    /// Connection blocked by the owner of the edge
    #[serde(alias = "block")]
    Blocked,
    /// Connection removed by the owner of the edge
    #[serde(alias = "remove")]
    Removed,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 5] = [
        ContactStatus::Pending,
        ContactStatus::Accepted,
        ContactStatus::Rejected,
        ContactStatus::Blocked,
        ContactStatus::Removed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Accepted => "accepted",
            ContactStatus::Rejected => "rejected",
            ContactStatus::Blocked => "blocked",
            ContactStatus::Removed => "removed",
        }
    }

    /// Parse a stored or submitted status
    ///
    /// The action spellings `block` and `remove` are accepted as aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(ContactStatus::Pending),
            "accepted" => Some(ContactStatus::Accepted),
            "rejected" => Some(ContactStatus::Rejected),
            "blocked" | "block" => Some(ContactStatus::Blocked),
            "removed" | "remove" => Some(ContactStatus::Removed),
            _ => None,
        }
    }

    /// Whether a contact request may ask for this status
    pub fn is_requestable(&self) -> bool {
        matches!(
            self,
            ContactStatus::Pending | ContactStatus::Accepted | ContactStatus::Rejected
        )
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action applied to an accepted contact
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactAction {
    Remove,
    Block,
}

impl ContactAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "remove" => Some(ContactAction::Remove),
            "block" => Some(ContactAction::Block),
            _ => None,
        }
    }

    /// Status the relationship ends up in after this action
    pub fn target_status(&self) -> ContactStatus {
        match self {
            ContactAction::Remove => ContactStatus::Removed,
            ContactAction::Block => ContactStatus::Blocked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactAction::Remove => "remove",
            ContactAction::Block => "block",
        }
    }
}

/// A persisted, directional contact edge keyed by (from, to)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRelationship {
    pub from_user_id: String,
    pub to_user_id: String,
    pub status: ContactStatus,
    /// Last time `to_user_id` dropped its live connection
    #[serde(default)]
    pub last_online: Option<DateTime<Utc>>,
}

impl ContactRelationship {
    pub fn new(from_user_id: impl Into<String>, to_user_id: impl Into<String>, status: ContactStatus) -> Self {
        Self {
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
            status,
            last_online: None,
        }
    }

    /// Whether this edge touches `user` on either side
    pub fn involves(&self, user: &str) -> bool {
        self.from_user_id == user || self.to_user_id == user
    }
}

/// Request to add a contact or move an existing request along
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub from_user_id: String,
    pub to_user_id: String,
    /// One of `pending`, `accepted`, `rejected`
    pub status: String,
}

impl ContactRequest {
    pub fn new(from_user_id: impl Into<String>, to_user_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
            status: status.into(),
        }
    }

    /// Validate the payload and return the requested status
    pub fn validate(&self) -> Result<ContactStatus, SharedError> {
        let status = ContactStatus::parse(&self.status)
            .filter(ContactStatus::is_requestable)
            .ok_or_else(|| SharedError::invalid_status("status", self.status.clone()))?;

        if self.from_user_id.trim().is_empty() {
            return Err(SharedError::validation("fromUserId", "must not be empty"));
        }
        if self.to_user_id.trim().is_empty() {
            return Err(SharedError::validation(
                "toUserId",
                "please provide the username of the contact",
            ));
        }
        if self.from_user_id == self.to_user_id {
            return Err(SharedError::validation("toUserId", "you cannot send a request to yourself"));
        }
        Ok(status)
    }
}

/// Request to block or remove an accepted contact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactActionRequest {
    pub user_id: String,
    pub contact_id: String,
    /// One of `remove`, `block`
    pub action: String,
}

impl ContactActionRequest {
    pub fn new(user_id: impl Into<String>, contact_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            contact_id: contact_id.into(),
            action: action.into(),
        }
    }

    /// Validate the payload and return the parsed action
    pub fn validate(&self) -> Result<ContactAction, SharedError> {
        let action = ContactAction::parse(&self.action)
            .ok_or_else(|| SharedError::invalid_status("action", self.action.clone()))?;
        if self.user_id.trim().is_empty() {
            return Err(SharedError::validation("userId", "must not be empty"));
        }
        if self.contact_id.trim().is_empty() {
            return Err(SharedError::validation("contactId", "must not be empty"));
        }
        if self.user_id == self.contact_id {
            return Err(SharedError::validation("contactId", "you cannot act on yourself"));
        }
        Ok(action)
    }
}

/// Which relationships a contact listing returns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactScope {
    /// Only edges where the user is the `from` side
    #[default]
    Outbound,
    /// Edges where the user is on either side
    All,
}
