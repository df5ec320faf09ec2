//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database loading and store selection
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Database**: Connects to PostgreSQL if `DATABASE_URL` is set
//! 2. **Stores**: PostgreSQL adapters or in-memory ones
//! 3. **Services**: Registry, dispatcher and contact state machine
//! 4. **Router**: Configures all routes and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use xfchat::backend::server::create_app;
//! use xfchat::shared::AppConfig;
//!
//! # async fn example() {
//! let config = AppConfig::builder().build().unwrap();
//! let app = create_app(&config).await;
//! # let _ = app.router;
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::Stores;
pub use init::{build_state, create_app, create_in_memory_app, App};
pub use state::AppState;
