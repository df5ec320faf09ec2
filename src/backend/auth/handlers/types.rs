/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * These types are shared across signup, login, and get_me handlers.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login handlers. Contains the JWT token
/// and user information for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication (30-day expiration)
    pub token: String,
    pub user: UserResponse,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
