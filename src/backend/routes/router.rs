/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Real-time routes (`/ws`, `/health`)
 * 2. API routes (messages, contacts, auth)
 * 3. Fallback handler (404 envelope)
 *
 * Every request is traced by `TraceLayer`.
 */

use axum::{extract::State, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::realtime::{handle_websocket, ConnectionRegistry};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub online_connections: usize,
    /// `postgres` or `memory`
    pub storage: &'static str,
}

/// Liveness plus the number of registered sockets
///
/// With a database configured, a failing `SELECT 1` reports a storage error.
pub async fn health(
    State(registry): State<ConnectionRegistry>,
    State(db_pool): State<Option<PgPool>>,
) -> Result<ApiResponse<HealthReport>, BackendError> {
    let storage = match &db_pool {
        Some(pool) => {
            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .map_err(|e| BackendError::storage(e.into()))?;
            "postgres"
        }
        None => "memory",
    };

    Ok(ApiResponse::ok(
        "ok",
        HealthReport {
            status: "ok",
            online_connections: registry.online_count(),
            storage,
        },
    ))
}

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Real-time Routes
///
/// - `GET /ws?userID=<id>` - WebSocket upgrade
/// - `GET /health` - Liveness and online connection count
///
/// ## API Routes
///
/// See `configure_api_routes`.
///
/// ## Fallback
///
/// Unknown routes get a `not_found` error envelope.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/ws", axum::routing::get(handle_websocket))
        .route("/health", axum::routing::get(health));

    // Add API routes
    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::not_found("route not found") });

    router
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
