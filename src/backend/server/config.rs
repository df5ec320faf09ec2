/**
 * Server Configuration
 *
 * This module turns an `AppConfig` into live infrastructure: the optional
 * PostgreSQL pool and the set of stores the services run on.
 *
 * # Store Selection
 *
 * With a database the PostgreSQL adapters are used; without one every
 * store is kept in process memory and is lost on restart.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. A pool
 * that fails to connect is treated as absent.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::users::{InMemoryUserDirectory, PgUserDirectory, UserDirectory};
use crate::backend::contacts::db::PgContactStore;
use crate::backend::contacts::store::{ContactStore, InMemoryContactStore};
use crate::backend::messaging::db::PgMessageStore;
use crate::backend::messaging::store::{InMemoryMessageStore, MessageStore};
use crate::shared::AppConfig;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads the database URL from the configuration
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if no URL is configured or the connection fails
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let database_url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Using in-memory stores.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory stores.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// The persistence adapters the services are built on
#[derive(Clone)]
pub struct Stores {
    pub messages: Arc<dyn MessageStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub users: Arc<dyn UserDirectory>,
}

impl Stores {
    /// Stores kept in process memory
    pub fn in_memory() -> Self {
        Self {
            messages: Arc::new(InMemoryMessageStore::new()),
            contacts: Arc::new(InMemoryContactStore::new()),
            users: Arc::new(InMemoryUserDirectory::new()),
        }
    }

    /// Stores backed by `pool`
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            messages: Arc::new(PgMessageStore::new(pool.clone())),
            contacts: Arc::new(PgContactStore::new(pool.clone())),
            users: Arc::new(PgUserDirectory::new(pool)),
        }
    }

    /// Pick the adapters for an optional pool
    pub fn for_pool(pool: Option<&PgPool>) -> Self {
        match pool {
            Some(pool) => Self::postgres(pool.clone()),
            None => Self::in_memory(),
        }
    }
}
