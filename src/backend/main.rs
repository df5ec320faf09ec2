/**
 * xfchat Server Entry Point
 *
 * Loads configuration, initializes tracing, builds the application and
 * serves it until Ctrl-C.
 */

use xfchat::backend::server::create_app;
use xfchat::shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // Initialize tracing with INFO level by default
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    let config = AppConfig::from_env()?;
    if config.uses_dev_secret() {
        tracing::warn!("[STARTUP] JWT_SECRET not set, using the development secret");
    }

    let app = create_app(&config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[STARTUP] Listening on {}", addr);

    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("[SHUTDOWN] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[SHUTDOWN] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("[SHUTDOWN] Ctrl-C received, draining connections");
}
