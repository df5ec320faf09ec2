/**
 * WebSocket Accept Loop
 *
 * Upgrades `GET /ws?userID=<id>` requests, registers the socket in the
 * `ConnectionRegistry`, and runs it until the client leaves or a newer
 * connection for the same user evicts it.
 *
 * # Tasks per Connection
 *
 * - A writer task drains the bounded outbound queue into the socket
 * - The read loop echoes inbound text frames back through the same queue
 *
 * Both stop when the connection's close token is cancelled. On the way
 * out the socket releases only its own registration, so a replacement
 * connection stays registered.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::HeaderMap,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::backend::auth::sessions::TokenSecret;
use crate::backend::error::BackendError;
use crate::backend::middleware::authenticate_optional;
use crate::backend::realtime::registry::{Connection, ConnectionId, ConnectionRegistry, Outbound};
use crate::backend::server::state::AppState;

/// Query parameters accepted on the upgrade request
#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
    pub token: Option<String>,
}

/// Decide which user an upgrade request connects as
///
/// `userID` is required. When the request carries a bearer token, in the
/// `Authorization` header or the `token` parameter, its principal must be
/// that same user.
pub fn authorize_upgrade(
    params: &WsParams,
    headers: &HeaderMap,
    secret: &TokenSecret,
) -> Result<String, BackendError> {
    let user_id = params
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BackendError::validation("userID query parameter is required"))?;

    if let Some(principal) = authenticate_optional(headers, params.token.as_deref(), secret)? {
        principal.ensure_is(user_id)?;
    }

    Ok(user_id.to_string())
}

/// Handle `GET /ws`
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Response, BackendError> {
    let user_id = authorize_upgrade(&params, &headers, &state.token_secret).map_err(|e| {
        tracing::warn!("[WebSocket] Upgrade refused: {}", e);
        e
    })?;

    Ok(ws.on_upgrade(move |socket| run_connection(socket, user_id, state)))
}

async fn run_connection(socket: WebSocket, user_id: String, state: AppState) {
    let (connection, outbound) = Connection::open(state.outbound_queue_capacity);
    let connection_id = connection.id();
    let echo = connection.sender();
    state.registry.register(&user_id, connection);
    tracing::info!("[WebSocket] {} connected ({})", user_id, connection_id);

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let Outbound { mut rx, closed } = outbound;

    // Writer: queue -> socket
    let writer_closed = closed.clone();
    let writer = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = writer_closed.cancelled() => break,
                frame = rx.recv() => match frame {
                    Some(text) => {
                        if ws_sender.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
        let _ = ws_sender.send(Message::Close(None)).await;
    });

    // Reader: socket -> echo
    loop {
        tokio::select! {
            _ = closed.cancelled() => {
                tracing::debug!("[WebSocket] {} ({}) closed by registry", user_id, connection_id);
                break;
            }
            frame = ws_receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if echo.try_send(text.to_string()).is_err() {
                        tracing::debug!("[WebSocket] Dropped echo for {}: queue full", user_id);
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!("[WebSocket] {} closed the connection", user_id);
                    break;
                }
                Some(Err(e)) => {
                    tracing::warn!("[WebSocket] Read error for {}: {}", user_id, e);
                    break;
                }
                Some(Ok(_)) => {}
            },
        }
    }

    let offline = went_offline(&state.registry, &user_id, connection_id);
    closed.cancel();
    drop(echo);

    if offline {
        if let Err(e) = state.contacts.record_last_online(&user_id).await {
            tracing::warn!("[WebSocket] Failed to record last online for {}: {}", user_id, e);
        }
    }

    let _ = writer.await;
    tracing::info!("[WebSocket] {} disconnected ({})", user_id, connection_id);
}

/// Release `connection_id` and report whether `user_id` is now offline
///
/// True when this socket removed itself, or when the registry already
/// evicted it and nothing replaced it. False when a newer connection holds
/// the slot.
fn went_offline(registry: &ConnectionRegistry, user_id: &str, connection_id: ConnectionId) -> bool {
    registry.release(user_id, connection_id) || !registry.is_online(user_id)
}
