/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation. Tokens are
 * HS256-signed and carry the username as the `sub` claim, which is the
 * principal every authenticated route acts as.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Token lifetime in seconds (30 days)
const TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Username of the principal
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Authentication failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid authorization header")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("failed to issue token: {0}")]
    Issue(String),
}

/// Create a JWT token for `username`
pub fn create_token(username: &str, secret: &str) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: username.to_string(),
        exp: (now + TOKEN_TTL_SECS) as u64,
        iat: now as u64,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| AuthError::Issue(e.to_string()))
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data =
        decode::<Claims>(token, &key, &Validation::default()).map_err(AuthError::InvalidToken)?;
    Ok(token_data.claims)
}

/// HS256 signing secret shared by token issuance and verification
#[derive(Clone)]
pub struct TokenSecret(Arc<str>);

impl TokenSecret {
    pub fn new(secret: impl AsRef<str>) -> Self {
        Self(Arc::from(secret.as_ref()))
    }

    /// Issue a token for `username`
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        create_token(username, &self.0)
    }

    /// Verify `token` and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        verify_token(token, &self.0)
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(..)")
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MalformedHeader)
}
