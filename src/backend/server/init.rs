/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, service construction and route configuration.
 *
 * # Initialization Process
 *
 * The server initialization follows these steps:
 * 1. Load the optional database
 * 2. Pick the stores for it
 * 3. Build the registry and the services on top of the stores
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::auth::sessions::TokenSecret;
use crate::backend::contacts::ContactStateMachine;
use crate::backend::messaging::MessageDispatcher;
use crate::backend::realtime::ConnectionRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, Stores};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// A configured application: the router to serve plus the state behind it
pub struct App {
    pub router: Router<()>,
    pub state: AppState,
}

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: in-memory stores are used
/// - Migration failures: logged but don't prevent startup
pub async fn create_app(config: &AppConfig) -> App {
    tracing::info!("Initializing xfchat backend server");

    // Step 1: Load optional database
    let db_pool = load_database(config).await;

    // Step 2: Select stores
    let stores = Stores::for_pool(db_pool.as_ref());

    // Step 3: Build services
    let state = build_state(config, stores, db_pool);
    tracing::info!(
        "Services initialized (queue capacity {}, accept creates entry: {})",
        config.outbound_queue_capacity,
        config.accept_creates_entry
    );

    // Step 4: Create router with all routes
    let router = create_router(state.clone());

    App { router, state }
}

/// Build the application state over the given stores
///
/// The dispatcher and the socket handler share one registry.
pub fn build_state(config: &AppConfig, stores: Stores, db_pool: Option<sqlx::PgPool>) -> AppState {
    let registry = ConnectionRegistry::new();
    let dispatcher = MessageDispatcher::new(stores.messages, registry.clone());
    let contacts = ContactStateMachine::new(
        stores.contacts,
        stores.users.clone(),
        config.accept_creates_entry,
    );

    AppState {
        registry,
        dispatcher,
        contacts,
        users: stores.users,
        token_secret: TokenSecret::new(&config.jwt_secret),
        outbound_queue_capacity: config.outbound_queue_capacity,
        db_pool,
    }
}

/// Application over in-memory stores, without touching the environment
pub fn create_in_memory_app(config: &AppConfig) -> App {
    let state = build_state(config, Stores::in_memory(), None);
    let router = create_router(state.clone());
    App { router, state }
}
