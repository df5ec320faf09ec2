/**
 * User Model and Directory
 *
 * This module holds user accounts and answers whether a username exists.
 * The contact state machine only needs `exists`; signup and login use the
 * rest.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::error::StoreError;

/// User struct representing a user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// Answers questions about registered users
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Whether `username` belongs to a registered user
    async fn exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Look a user up by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Register a new user; `StoreError::Duplicate` if the username is taken
    async fn create(&self, user: &User) -> Result<(), StoreError>;
}

/// User directory kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-populated with password-less accounts
    pub fn with_usernames<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let users = usernames
            .into_iter()
            .map(|name| {
                let name = name.into();
                let email = format!("{}@localhost", name);
                (name.clone(), User::new(name, email, ""))
            })
            .collect();
        Self { users: RwLock::new(users) }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::Duplicate);
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }
}

/// User directory backed by the `users` table
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
