/**
 * Message Dispatcher
 *
 * Persist-then-deliver orchestration for sending, editing and deleting
 * direct messages.
 *
 * # Delivery Model
 *
 * 1. Validate the request
 * 2. Write to the `MessageStore`; a failure here fails the call
 * 3. Push a frame to the recipient through the `ConnectionRegistry`
 *
 * Step 3 only runs after step 2 succeeds and its outcome never changes
 * the result. There is no retry and no offline queue: a recipient who is
 * not connected re-fetches history later.
 */

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::error::StoreError;
use crate::backend::messaging::store::MessageStore;
use crate::backend::realtime::{ConnectionRegistry, DeliveryOutcome};
use crate::shared::messaging::{
    DeleteMessageRequest, DirectMessage, EditMessageRequest, SendMessageRequest,
};
use crate::shared::{DeleteAck, ServerFrame, SharedError};

/// Errors returned by the dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Invalid(#[from] SharedError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A persisted record plus what happened to its real-time push
#[derive(Debug, Clone)]
pub struct Dispatched<T> {
    pub record: T,
    pub delivery: DeliveryOutcome,
}

/// Orchestrates message persistence and delivery
#[derive(Clone)]
pub struct MessageDispatcher {
    store: Arc<dyn MessageStore>,
    registry: ConnectionRegistry,
}

impl MessageDispatcher {
    pub fn new(store: Arc<dyn MessageStore>, registry: ConnectionRegistry) -> Self {
        Self { store, registry }
    }

    fn push(&self, user_id: &str, frame: ServerFrame) -> DeliveryOutcome {
        let delivery = self.registry.send(user_id, &frame);
        tracing::debug!(
            "[Dispatcher] {} frame for {}: {}",
            frame.kind(),
            user_id,
            delivery.as_str()
        );
        delivery
    }

    /// Send a new message
    pub async fn send(
        &self,
        request: SendMessageRequest,
    ) -> Result<Dispatched<DirectMessage>, DispatchError> {
        request.validate()?;
        let message = DirectMessage::compose(request);

        self.store.insert(&message).await.map_err(|e| {
            tracing::error!("[Dispatcher] Failed to persist message {}: {}", message.id, e);
            e
        })?;

        let delivery = self.push(&message.recipient_id, ServerFrame::Message(message.clone()));
        tracing::info!(
            "[Dispatcher] Message {} from {} to {} stored, delivery {}",
            message.id,
            message.sender_id,
            message.recipient_id,
            delivery.as_str()
        );

        Ok(Dispatched { record: message, delivery })
    }

    /// Messages sent by `sender_id` to `recipient_id`, oldest first
    pub async fn get(
        &self,
        sender_id: &str,
        recipient_id: &str,
    ) -> Result<Vec<DirectMessage>, DispatchError> {
        Ok(self.store.find_between(sender_id, recipient_id).await?)
    }

    /// Both directions of a conversation, oldest first
    pub async fn conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<DirectMessage>, DispatchError> {
        Ok(self.store.find_conversation(user_a, user_b).await?)
    }

    /// Edit a message previously sent by `from_user_id`
    pub async fn edit(
        &self,
        request: EditMessageRequest,
    ) -> Result<Dispatched<DirectMessage>, DispatchError> {
        request.validate()?;

        let mut message = self
            .store
            .find_sent_by(request.id, &request.from_user_id)
            .await?
            .ok_or(DispatchError::NotFound("message not found, cannot edit"))?;

        message.apply_edit(&request.new_text, Utc::now());

        if !self.store.update_content(&message).await? {
            return Err(DispatchError::NotFound("message not found, cannot edit"));
        }

        let delivery =
            self.push(&request.to_user_id, ServerFrame::MessageEdited(message.clone()));
        tracing::info!(
            "[Dispatcher] Message {} edited by {}, delivery {}",
            message.id,
            request.from_user_id,
            delivery.as_str()
        );

        Ok(Dispatched { record: message, delivery })
    }

    /// Delete a message previously sent by `from_user_id`
    pub async fn delete(
        &self,
        request: DeleteMessageRequest,
    ) -> Result<Dispatched<DeleteAck>, DispatchError> {
        request.validate()?;

        if !self.store.delete(request.id, &request.from_user_id).await? {
            return Err(DispatchError::NotFound("message not found"));
        }

        let ack = DeleteAck::new(request.id, request.from_user_id, request.to_user_id);
        let delivery = self.push(&ack.to_user_id, ServerFrame::MessageDeleted(ack.clone()));
        tracing::info!(
            "[Dispatcher] Message {} deleted by {}, delivery {}",
            ack.id,
            ack.from_user_id,
            delivery.as_str()
        );

        Ok(Dispatched { record: ack, delivery })
    }
}
