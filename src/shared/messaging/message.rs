//! Direct Message Data Structure
//!
//! Represents a message sent from one user to another, plus the request
//! bodies used to send, edit and delete it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::SharedError;

/// Lifecycle status of a stored message
///
/// Deletion removes the record, so there is no deleted variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Created by a send
    #[default]
    Sent,
    /// Content replaced by the original sender
    Edited,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Sent => "sent",
            MessageStatus::Edited => "edited",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(MessageStatus::Sent),
            "edited" => Some(MessageStatus::Edited),
            _ => None,
        }
    }
}

/// Derive the key identifying a sender → recipient message stream
///
/// The key is ordered: `conversation_key("alice", "bob")` and
/// `conversation_key("bob", "alice")` differ.
pub fn conversation_key(sender_id: &str, recipient_id: &str) -> String {
    format!("{} -> {}", sender_id, recipient_id)
}

/// A persisted direct message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    /// Unique message ID, generated at send time
    pub id: Uuid,
    /// Ordered sender/recipient stream key
    pub conversation_key: String,
    /// User who sent the message
    pub sender_id: String,
    /// User the message is addressed to
    pub recipient_id: String,
    /// Text content
    pub content: String,
    /// Optional uploaded media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Creation time, or the time of the last edit
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
}

impl DirectMessage {
    /// Build a fresh message from a validated send request
    ///
    /// Assigns a new ID, the current timestamp and the `sent` status.
    pub fn compose(request: SendMessageRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_key: conversation_key(&request.sender_id, &request.recipient_id),
            sender_id: request.sender_id,
            recipient_id: request.recipient_id,
            content: request.content,
            media_url: request.media_url.filter(|url| !url.is_empty()),
            timestamp: Utc::now(),
            status: MessageStatus::Sent,
        }
    }

    /// Apply an edit in place
    ///
    /// Only `content`, `timestamp` and `status` change; identity fields are
    /// left untouched.
    pub fn apply_edit(&mut self, new_text: &str, at: DateTime<Utc>) {
        self.content = new_text.to_string();
        self.timestamp = at;
        self.status = MessageStatus::Edited;
    }
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub sender_id: String,
    pub recipient_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
}

impl SendMessageRequest {
    pub fn new(sender_id: impl Into<String>, recipient_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            content: content.into(),
            media_url: None,
        }
    }

    /// Check the payload invariants that do not need a store
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_pair(&self.sender_id, &self.recipient_id, "senderId", "recipientId")?;
        let has_media = self.media_url.as_deref().is_some_and(|url| !url.is_empty());
        if self.content.trim().is_empty() && !has_media {
            return Err(SharedError::validation("content", "message must carry content or media"));
        }
        Ok(())
    }
}

/// Request to edit a previously sent message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessageRequest {
    pub id: Uuid,
    pub from_user_id: String,
    pub to_user_id: String,
    pub new_text: String,
}

impl EditMessageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_pair(&self.from_user_id, &self.to_user_id, "fromUserId", "toUserId")?;
        if self.new_text.trim().is_empty() {
            return Err(SharedError::validation("newText", "edited text must not be empty"));
        }
        Ok(())
    }
}

/// Request to delete a previously sent message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMessageRequest {
    pub id: Uuid,
    pub from_user_id: String,
    pub to_user_id: String,
}

impl DeleteMessageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_pair(&self.from_user_id, &self.to_user_id, "fromUserId", "toUserId")
    }
}

/// Projection returned by the message history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<&DirectMessage> for MessageView {
    fn from(message: &DirectMessage) -> Self {
        Self {
            content: message.content.clone(),
            media_url: message.media_url.clone(),
            timestamp: message.timestamp,
        }
    }
}

fn validate_pair(from: &str, to: &str, from_field: &str, to_field: &str) -> Result<(), SharedError> {
    if from.trim().is_empty() {
        return Err(SharedError::validation(from_field, "must not be empty"));
    }
    if to.trim().is_empty() {
        return Err(SharedError::validation(to_field, "must not be empty"));
    }
    if from == to {
        return Err(SharedError::validation(to_field, "sender and recipient must differ"));
    }
    Ok(())
}
