/**
 * Connection Registry
 *
 * Tracks the single live WebSocket of each online user and pushes frames
 * to it without ever touching the network from the caller's task.
 *
 * # Architecture
 *
 * Each connection owns a bounded outbound queue drained by its own writer
 * task. The registry only holds the sending half of that queue plus a
 * cancellation token that tears the socket down.
 *
 * ```text
 * dispatcher ──send()──► [ mutex: map lookup + try_send ] ──► queue ──► writer task ──► socket
 * ```
 *
 * The mutex is held for map mutation and the non-blocking enqueue only, so
 * a slow client fills its own queue and gets evicted instead of stalling
 * everyone else.
 *
 * # Invariants
 *
 * - At most one connection per user; registering again closes the old one
 * - A connection removed from the map is always closed
 * - A connection whose queue is full or whose writer is gone is removed
 *   and closed the first time a send notices it
 */

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identifies one accepted socket, distinct across reconnects of the same user
pub type ConnectionId = Uuid;

/// Result of a best-effort push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The frame was queued for the user's live connection
    Delivered,
    /// The user has no live connection
    Offline,
    /// The connection was dead or backed up and has been evicted
    Failed,
}

impl DeliveryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOutcome::Delivered => "delivered",
            DeliveryOutcome::Offline => "offline",
            DeliveryOutcome::Failed => "failed",
        }
    }
}

/// Registry-side handle to a live socket
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    tx: mpsc::Sender<String>,
    closed: CancellationToken,
}

/// Socket-side half of a connection: the queue to drain and the close signal
#[derive(Debug)]
pub struct Outbound {
    pub rx: mpsc::Receiver<String>,
    pub closed: CancellationToken,
}

impl Connection {
    /// Open a connection with a bounded outbound queue
    pub fn open(capacity: usize) -> (Connection, Outbound) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let closed = CancellationToken::new();
        let connection = Connection {
            id: Uuid::new_v4(),
            tx,
            closed: closed.clone(),
        };
        (connection, Outbound { rx, closed })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Another handle onto the same outbound queue
    pub fn sender(&self) -> mpsc::Sender<String> {
        self.tx.clone()
    }

    /// Signal the socket tasks to shut down
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Whether the socket is shutting down or its writer has exited
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled() || self.tx.is_closed()
    }
}

/// In-process map of user ID to live connection
///
/// Cloning is cheap; all clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<String, Connection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connection` as the live connection for `user_id`
    ///
    /// Any prior connection for the same user is evicted and closed.
    pub fn register(&self, user_id: &str, connection: Connection) {
        let id = connection.id();
        let prior = self.connections.lock().insert(user_id.to_string(), connection);

        if let Some(prior) = prior {
            prior.close();
            tracing::info!(
                "[Registry] Evicted connection {} for {} in favour of {}",
                prior.id(),
                user_id,
                id
            );
        } else {
            tracing::info!("[Registry] Registered connection {} for {}", id, user_id);
        }
    }

    /// Remove and close the connection for `user_id`, if any
    pub fn unregister(&self, user_id: &str) -> bool {
        let removed = self.connections.lock().remove(user_id);
        match removed {
            Some(connection) => {
                connection.close();
                tracing::info!("[Registry] Unregistered {} ({})", user_id, connection.id());
                true
            }
            None => false,
        }
    }

    /// Remove the connection for `user_id` only if it is still `connection_id`
    ///
    /// A socket tearing itself down calls this so it never removes the
    /// connection that replaced it.
    pub fn release(&self, user_id: &str, connection_id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        let owned = connections
            .get(user_id)
            .is_some_and(|connection| connection.id() == connection_id);
        if !owned {
            return false;
        }
        if let Some(connection) = connections.remove(user_id) {
            connection.close();
        }
        drop(connections);

        tracing::info!("[Registry] Released {} ({})", user_id, connection_id);
        true
    }

    /// Push a JSON frame to the user's live connection
    ///
    /// Never blocks and never errors: an absent user is `Offline`, and a
    /// connection that cannot take the frame is evicted and reported as
    /// `Failed`.
    pub fn send<T: Serialize>(&self, user_id: &str, payload: &T) -> DeliveryOutcome {
        let frame = match serde_json::to_string(payload) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("[Registry] Failed to serialize frame for {}: {}", user_id, e);
                return DeliveryOutcome::Failed;
            }
        };

        let mut connections = self.connections.lock();
        let Some(connection) = connections.get(user_id) else {
            return DeliveryOutcome::Offline;
        };

        let reason = if connection.is_closed() {
            "connection closed"
        } else {
            match connection.tx.try_send(frame) {
                Ok(()) => return DeliveryOutcome::Delivered,
                Err(TrySendError::Full(_)) => "outbound queue full",
                Err(TrySendError::Closed(_)) => "writer gone",
            }
        };

        if let Some(dead) = connections.remove(user_id) {
            dead.close();
        }
        drop(connections);

        tracing::warn!("[Registry] Dropped connection for {}: {}", user_id, reason);
        DeliveryOutcome::Failed
    }

    /// Whether `user_id` currently has a registered connection
    pub fn is_online(&self, user_id: &str) -> bool {
        self.connections.lock().contains_key(user_id)
    }

    /// Number of registered connections
    pub fn online_count(&self) -> usize {
        self.connections.lock().len()
    }
}
