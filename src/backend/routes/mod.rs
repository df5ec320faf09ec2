//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, `/ws` and `/health`
//! └── api_routes.rs   - Message, contact and auth endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use xfchat::backend::routes::create_router;
//! use xfchat::backend::server::create_in_memory_app;
//! use xfchat::shared::AppConfig;
//!
//! let config = AppConfig::builder().build().unwrap();
//! let app = create_in_memory_app(&config);
//! let router = create_router(app.state);
//! # let _ = router;
//! ```

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
