//! Messaging HTTP Handlers
//!
//! This module contains the HTTP handlers for sending, reading, editing and
//! deleting direct messages. Every route requires a bearer token, and the
//! token's principal must be the user the body or query acts as.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::messaging::dispatcher::MessageDispatcher;
use crate::backend::middleware::AuthUser;
use crate::shared::messaging::{
    DeleteMessageRequest, DirectMessage, EditMessageRequest, MessageView, SendMessageRequest,
};
use crate::shared::{ApiResponse, DeleteAck};

/// Query string for the history endpoints
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub username: Option<String>,
    pub recipient: Option<String>,
}

impl MessageQuery {
    fn pair(self) -> Result<(String, String), BackendError> {
        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| BackendError::validation("username is required"))?;
        let recipient = self
            .recipient
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| BackendError::validation("recipient is required"))?;
        Ok((username, recipient))
    }
}

/// A stored message together with what happened to its live push
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredMessage {
    #[serde(flatten)]
    pub message: DirectMessage,
    /// `delivered`, `offline` or `failed`
    pub delivery: &'static str,
}

/// Send a message
pub async fn send_message(
    State(dispatcher): State<MessageDispatcher>,
    AuthUser(user): AuthUser,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<ApiResponse<DeliveredMessage>, BackendError> {
    let Json(request) = payload?;
    user.ensure_is(&request.sender_id)?;

    let sent = dispatcher.send(request).await?;
    Ok(ApiResponse::ok(
        "Message sent successfully",
        DeliveredMessage {
            message: sent.record,
            delivery: sent.delivery.as_str(),
        },
    ))
}

/// Messages sent by `username` to `recipient`
pub async fn get_messages(
    State(dispatcher): State<MessageDispatcher>,
    AuthUser(user): AuthUser,
    query: Result<Query<MessageQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<MessageView>>, BackendError> {
    let Query(query) = query?;
    let (username, recipient) = query.pair()?;
    user.ensure_participant(&username, &recipient)?;

    let messages = dispatcher.get(&username, &recipient).await?;
    tracing::debug!(
        "[Http] {} fetched {} messages {} -> {}",
        user.username,
        messages.len(),
        username,
        recipient
    );
    Ok(ApiResponse::ok(
        "Messages fetched successfully",
        messages.iter().map(MessageView::from).collect(),
    ))
}

/// Both directions of the conversation between `username` and `recipient`
pub async fn get_conversation(
    State(dispatcher): State<MessageDispatcher>,
    AuthUser(user): AuthUser,
    query: Result<Query<MessageQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<DirectMessage>>, BackendError> {
    let Query(query) = query?;
    let (username, recipient) = query.pair()?;
    user.ensure_participant(&username, &recipient)?;

    let messages = dispatcher.conversation(&username, &recipient).await?;
    Ok(ApiResponse::ok("Conversation fetched successfully", messages))
}

/// Edit a message the caller sent
pub async fn edit_message(
    State(dispatcher): State<MessageDispatcher>,
    AuthUser(user): AuthUser,
    payload: Result<Json<EditMessageRequest>, JsonRejection>,
) -> Result<ApiResponse<DeliveredMessage>, BackendError> {
    let Json(request) = payload?;
    user.ensure_is(&request.from_user_id)?;

    let edited = dispatcher.edit(request).await?;
    Ok(ApiResponse::ok(
        "Message edited successfully",
        DeliveredMessage {
            message: edited.record,
            delivery: edited.delivery.as_str(),
        },
    ))
}

/// Delete a message the caller sent
pub async fn delete_message(
    State(dispatcher): State<MessageDispatcher>,
    AuthUser(user): AuthUser,
    payload: Result<Json<DeleteMessageRequest>, JsonRejection>,
) -> Result<ApiResponse<DeleteAck>, BackendError> {
    let Json(request) = payload?;
    user.ensure_is(&request.from_user_id)?;

    let deleted = dispatcher.delete(request).await?;
    Ok(ApiResponse::ok("Message deleted successfully", deleted.record))
}
