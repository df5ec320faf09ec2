/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The connection registry of live WebSockets
 * - The message dispatcher and the contact state machine
 * - The user directory and the token secret
 * - The optional database pool
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and safe to share: services hold their
 * stores behind `Arc<dyn ...>` and the registry guards its map with a
 * mutex.
 *
 * # Example
 *
 * ```rust,no_run
 * use xfchat::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) -> String {
 *     format!("{} online", state.registry.online_count())
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::sessions::TokenSecret;
use crate::backend::auth::users::UserDirectory;
use crate::backend::contacts::ContactStateMachine;
use crate::backend::messaging::MessageDispatcher;
use crate::backend::realtime::ConnectionRegistry;

/// Application state shared by every handler
///
/// # Fields
///
/// * `registry` - Live WebSocket connections keyed by user
/// * `dispatcher` - Persist-then-deliver messaging service
/// * `contacts` - Contact relationship state machine
/// * `users` - Registered accounts
/// * `token_secret` - JWT signing secret
/// * `outbound_queue_capacity` - Frames buffered per connection
/// * `db_pool` - Optional PostgreSQL database connection pool
#[derive(Clone)]
pub struct AppState {
    /// Connection registry
    ///
    /// The dispatcher holds a clone of the same registry, so a socket
    /// registered here is what `send` delivers to.
    pub registry: ConnectionRegistry,

    pub dispatcher: MessageDispatcher,

    pub contacts: ContactStateMachine,

    pub users: Arc<dyn UserDirectory>,

    pub token_secret: TokenSecret,

    /// Capacity of each connection's outbound queue
    pub outbound_queue_capacity: usize,

    /// Database connection pool
    ///
    /// This is `None` when `DATABASE_URL` is not set and the in-memory
    /// stores are in use.
    pub db_pool: Option<PgPool>,
}

/// Implement FromRef for TokenSecret
///
/// This lets the `AuthUser` extractor find the secret in any router
/// whose state is `AppState`.
impl FromRef<AppState> for TokenSecret {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.token_secret.clone()
    }
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for MessageDispatcher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.dispatcher.clone()
    }
}

impl FromRef<AppState> for ContactStateMachine {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.contacts.clone()
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
