//! Database operations for messaging
//!
//! PostgreSQL-backed `MessageStore`. Rows live in the `messages` table
//! created by `migrations/20250101000000_init.sql`.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::backend::error::StoreError;
use crate::backend::messaging::store::MessageStore;
use crate::shared::messaging::{DirectMessage, MessageStatus};

/// Message store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn message_from_row(row: &PgRow) -> Result<DirectMessage, StoreError> {
    let status: String = row.try_get("status")?;
    let status = MessageStatus::parse(&status)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown message status '{}'", status)))?;

    Ok(DirectMessage {
        id: row.try_get("id")?,
        conversation_key: row.try_get("conversation_key")?,
        sender_id: row.try_get("sender_id")?,
        recipient_id: row.try_get("recipient_id")?,
        content: row.try_get("content")?,
        media_url: row.try_get("media_url")?,
        timestamp: row.try_get("sent_at")?,
        status,
    })
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn insert(&self, message: &DirectMessage) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_key, sender_id, recipient_id, content, media_url, sent_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.id)
        .bind(&message.conversation_key)
        .bind(&message.sender_id)
        .bind(&message.recipient_id)
        .bind(&message.content)
        .bind(message.media_url.as_deref())
        .bind(message.timestamp)
        .bind(message.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_between(
        &self,
        sender_id: &str,
        recipient_id: &str,
    ) -> Result<Vec<DirectMessage>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_key, sender_id, recipient_id, content, media_url, sent_at, status
            FROM messages
            WHERE sender_id = $1 AND recipient_id = $2
            ORDER BY sent_at ASC
            "#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(message_from_row).collect()
    }

    async fn find_conversation(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<DirectMessage>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_key, sender_id, recipient_id, content, media_url, sent_at, status
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY sent_at ASC
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(message_from_row).collect()
    }

    async fn find_sent_by(
        &self,
        id: Uuid,
        sender_id: &str,
    ) -> Result<Option<DirectMessage>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, conversation_key, sender_id, recipient_id, content, media_url, sent_at, status
            FROM messages
            WHERE id = $1 AND sender_id = $2
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(message_from_row).transpose()
    }

    async fn update_content(&self, message: &DirectMessage) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET content = $1, sent_at = $2, status = $3
            WHERE id = $4 AND sender_id = $5
            "#,
        )
        .bind(&message.content)
        .bind(message.timestamp)
        .bind(message.status.as_str())
        .bind(message.id)
        .bind(&message.sender_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid, sender_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM messages
            WHERE id = $1 AND sender_id = $2
            "#,
        )
        .bind(id)
        .bind(sender_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
