/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /auth/me, which returns
 * information about the currently authenticated user.
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Get current user handler
///
/// # Errors
///
/// * `401` - If the token is missing or invalid
/// * `404` - If the token's user no longer exists
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<ApiResponse<UserResponse>, BackendError> {
    let user = state
        .users
        .find_by_username(&principal.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("[Auth] Token user not found: {}", principal.username);
            BackendError::not_found("user not found")
        })?;

    Ok(ApiResponse::ok("User fetched successfully", UserResponse::from(&user)))
}
