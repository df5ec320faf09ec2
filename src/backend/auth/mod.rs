//! Authentication Module
//!
//! This module handles user registration, login and bearer tokens. The
//! username is the principal: it is the JWT `sub` claim and the identity
//! every messaging and contact route checks against.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and the `UserDirectory` stores
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email and password → user created → JWT returned
//! 2. **Login**: username and password → credentials verified → JWT returned
//! 3. **Requests**: `Authorization: Bearer <jwt>` → principal extracted
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens expire after 30 days
//! - Invalid credentials return 401 (no information leakage)

/// User data model and directory
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, signup, AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use sessions::{AuthError, Claims, TokenSecret};
pub use users::{InMemoryUserDirectory, PgUserDirectory, User, UserDirectory};
