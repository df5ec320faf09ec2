//! Message persistence
//!
//! `MessageStore` is the seam between the dispatcher and whatever holds
//! message records. The PostgreSQL implementation lives in `db`; the
//! in-memory one here backs tests and database-less runs.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::error::StoreError;
use crate::shared::messaging::DirectMessage;

/// Persists and queries direct messages
///
/// Every filter that mutates a record matches on both the message ID and
/// the sender, so only the original sender can change a message.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a freshly composed message
    async fn insert(&self, message: &DirectMessage) -> Result<(), StoreError>;

    /// Messages sent by `sender_id` to `recipient_id`, oldest first
    async fn find_between(
        &self,
        sender_id: &str,
        recipient_id: &str,
    ) -> Result<Vec<DirectMessage>, StoreError>;

    /// Messages in either direction between two users, oldest first
    async fn find_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<DirectMessage>, StoreError>;

    /// Look a message up by ID, only if `sender_id` sent it
    async fn find_sent_by(
        &self,
        id: Uuid,
        sender_id: &str,
    ) -> Result<Option<DirectMessage>, StoreError>;

    /// Overwrite content, timestamp and status of an existing message
    ///
    /// Returns `false` when no message matched `(id, sender_id)`.
    async fn update_content(&self, message: &DirectMessage) -> Result<bool, StoreError>;

    /// Remove a message; returns `false` when nothing matched
    async fn delete(&self, id: Uuid, sender_id: &str) -> Result<bool, StoreError>;
}

/// Message store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<Vec<DirectMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

fn oldest_first(mut messages: Vec<DirectMessage>) -> Vec<DirectMessage> {
    messages.sort_by_key(|message| message.timestamp);
    messages
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: &DirectMessage) -> Result<(), StoreError> {
        let mut messages = self.messages.write().await;
        if messages.iter().any(|existing| existing.id == message.id) {
            return Err(StoreError::Duplicate);
        }
        messages.push(message.clone());
        Ok(())
    }

    async fn find_between(
        &self,
        sender_id: &str,
        recipient_id: &str,
    ) -> Result<Vec<DirectMessage>, StoreError> {
        let messages = self.messages.read().await;
        Ok(oldest_first(
            messages
                .iter()
                .filter(|m| m.sender_id == sender_id && m.recipient_id == recipient_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<DirectMessage>, StoreError> {
        let messages = self.messages.read().await;
        Ok(oldest_first(
            messages
                .iter()
                .filter(|m| {
                    (m.sender_id == user_a && m.recipient_id == user_b)
                        || (m.sender_id == user_b && m.recipient_id == user_a)
                })
                .cloned()
                .collect(),
        ))
    }

    async fn find_sent_by(
        &self,
        id: Uuid,
        sender_id: &str,
    ) -> Result<Option<DirectMessage>, StoreError> {
        let messages = self.messages.read().await;
        Ok(messages
            .iter()
            .find(|m| m.id == id && m.sender_id == sender_id)
            .cloned())
    }

    async fn update_content(&self, message: &DirectMessage) -> Result<bool, StoreError> {
        let mut messages = self.messages.write().await;
        let stored = messages
            .iter_mut()
            .find(|m| m.id == message.id && m.sender_id == message.sender_id);
        match stored {
            Some(stored) => {
                stored.content = message.content.clone();
                stored.timestamp = message.timestamp;
                stored.status = message.status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid, sender_id: &str) -> Result<bool, StoreError> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|m| !(m.id == id && m.sender_id == sender_id));
        Ok(messages.len() < before)
    }
}
