/**
 * Real-time Frames
 *
 * This module defines the frames pushed to a user's WebSocket. Each frame
 * is a single UTF-8 JSON text message with a `type` tag and the payload
 * fields inlined next to it, so a client that only cares about message
 * content can read `content` straight off the frame.
 *
 * # Frame Types
 *
 * - `message` - A new message addressed to the connected user
 * - `message_edited` - A message the user received was edited
 * - `message_deleted` - A message the user received was deleted
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::messaging::DirectMessage;

/// Acknowledgement pushed to the recipient after a delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    /// ID of the deleted message
    pub id: Uuid,
    pub from_user_id: String,
    pub to_user_id: String,
    /// Human-readable confirmation
    pub message: String,
}

impl DeleteAck {
    pub fn new(id: Uuid, from_user_id: impl Into<String>, to_user_id: impl Into<String>) -> Self {
        Self {
            id,
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
            message: "Message deleted successfully".to_string(),
        }
    }
}

/// A frame pushed from the server to a connected client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// A newly sent message
    Message(DirectMessage),
    /// An edited message, carrying the updated content
    MessageEdited(DirectMessage),
    /// A deleted message
    MessageDeleted(DeleteAck),
}

impl ServerFrame {
    /// Name of the frame type as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            ServerFrame::Message(_) => "message",
            ServerFrame::MessageEdited(_) => "message_edited",
            ServerFrame::MessageDeleted(_) => "message_deleted",
        }
    }
}
