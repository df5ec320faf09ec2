/**
 * Authentication Extractor
 *
 * This module authenticates requests from the `Authorization: Bearer`
 * header and hands the username principal to handlers. Handlers then
 * check that the principal is the user named in the request body.
 */

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::backend::auth::sessions::{bearer_token, AuthError, TokenSecret};
use crate::backend::error::BackendError;

/// Authenticated user data extracted from a JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

impl AuthenticatedUser {
    /// Require the principal to be `user`
    pub fn ensure_is(&self, user: &str) -> Result<(), BackendError> {
        if self.username == user {
            Ok(())
        } else {
            tracing::warn!("[Auth] {} attempted to act as {}", self.username, user);
            Err(BackendError::forbidden("you can only act on your own behalf"))
        }
    }

    /// Require the principal to be one of the two participants
    pub fn ensure_participant(&self, user_a: &str, user_b: &str) -> Result<(), BackendError> {
        if self.username == user_a || self.username == user_b {
            Ok(())
        } else {
            tracing::warn!("[Auth] {} is not part of {} <-> {}", self.username, user_a, user_b);
            Err(BackendError::forbidden("you are not part of this conversation"))
        }
    }
}

/// Authenticate from the `Authorization` header
pub fn authenticate(headers: &HeaderMap, secret: &TokenSecret) -> Result<AuthenticatedUser, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let claims = secret.verify(bearer_token(header)?)?;
    Ok(AuthenticatedUser { username: claims.sub })
}

/// Authenticate if credentials were supplied at all
///
/// Looks at the `Authorization` header first, then at `query_token`.
/// Returns `Ok(None)` when neither is present.
pub fn authenticate_optional(
    headers: &HeaderMap,
    query_token: Option<&str>,
    secret: &TokenSecret,
) -> Result<Option<AuthenticatedUser>, AuthError> {
    if headers.contains_key(AUTHORIZATION) {
        return authenticate(headers, secret).map(Some);
    }
    match query_token.filter(|token| !token.is_empty()) {
        Some(token) => {
            let claims = secret.verify(token)?;
            Ok(Some(AuthenticatedUser { username: claims.sub }))
        }
        None => Ok(None),
    }
}

/// Axum extractor for authenticated user
///
/// Rejects with `401` and the JSON error envelope when the token is
/// missing or invalid.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    TokenSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let secret = TokenSecret::from_ref(state);
        let user = authenticate(&parts.headers, &secret).map_err(|e| {
            tracing::warn!("[Auth] Rejected request to {}: {}", parts.uri.path(), e);
            BackendError::from(e)
        })?;
        Ok(AuthUser(user))
    }
}
