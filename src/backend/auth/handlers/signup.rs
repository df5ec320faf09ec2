/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Hash password using bcrypt
 * 3. Create the user; a taken username is a conflict
 * 4. Generate JWT token
 * 5. Return token and user info
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::backend::auth::users::User;
use crate::backend::error::{BackendError, StoreError};
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Validate username format
///
/// Usernames must be 3-30 characters of ASCII letters, digits or
/// underscores.
pub fn is_valid_username(username: &str) -> bool {
    (3..=30).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate(request: &SignupRequest) -> Result<(), BackendError> {
    if !is_valid_username(&request.username) {
        return Err(BackendError::validation(
            "username must be 3-30 characters of letters, numbers and underscores",
        ));
    }
    if !request.email.contains('@') {
        return Err(BackendError::validation("invalid email format"));
    }
    if request.password.len() < 8 {
        return Err(BackendError::validation("password must be at least 8 characters"));
    }
    Ok(())
}

/// Sign up handler
///
/// # Errors
///
/// * `400` - If the username, email or password is invalid
/// * `409` - If the username is already taken
/// * `500` - If password hashing, user creation, or token generation fails
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiResponse<AuthResponse>, BackendError> {
    let Json(request) = payload?;
    tracing::info!("[Auth] Signup request for username: {}", request.username);

    validate(&request).inspect_err(|e| {
        tracing::warn!("[Auth] Signup rejected for {}: {}", request.username, e);
    })?;

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("[Auth] Failed to hash password: {:?}", e);
        BackendError::internal("failed to hash password")
    })?;

    let user = User::new(request.username, request.email, password_hash);
    state.users.create(&user).await.map_err(|e| match e {
        StoreError::Duplicate => {
            tracing::warn!("[Auth] Username already exists: {}", user.username);
            BackendError::conflict("username already taken")
        }
        other => BackendError::from(other),
    })?;

    let token = state.token_secret.issue(&user.username)?;
    tracing::info!("[Auth] User created successfully: {}", user.username);

    Ok(ApiResponse::ok(
        "User created successfully",
        AuthResponse {
            token,
            user: UserResponse::from(&user),
        },
    ))
}
