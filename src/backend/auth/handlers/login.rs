/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * Unknown users and wrong passwords get the same 401 response.
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::AuthError;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Login handler
///
/// # Errors
///
/// * `401` - If user is not found or password is incorrect
/// * `500` - If the directory lookup or token generation fails
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<AuthResponse>, BackendError> {
    let Json(request) = payload?;
    tracing::info!("[Auth] Login request for: {}", request.username);

    let user = state
        .users
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] User not found: {}", request.username);
            AuthError::InvalidCredentials
        })?;

    // Seeded accounts have no hash and cannot log in
    let valid = !user.password_hash.is_empty()
        && verify(&request.password, &user.password_hash).map_err(|e| {
            tracing::error!("[Auth] Password verification error: {:?}", e);
            BackendError::internal("password verification failed")
        })?;

    if !valid {
        tracing::warn!("[Auth] Invalid password for user: {}", request.username);
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.token_secret.issue(&user.username)?;
    tracing::info!("[Auth] User logged in successfully: {}", user.username);

    Ok(ApiResponse::ok(
        "User logged in successfully",
        AuthResponse {
            token,
            user: UserResponse::from(&user),
        },
    ))
}
