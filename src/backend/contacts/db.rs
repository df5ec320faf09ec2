//! Database operations for contacts
//!
//! PostgreSQL-backed `ContactStore` over the `contacts` table, whose
//! primary key `(from_user_id, to_user_id)` enforces one edge per ordered
//! pair.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::backend::contacts::store::{ContactStore, UpsertOutcome};
use crate::backend::error::StoreError;
use crate::shared::messaging::{ContactRelationship, ContactStatus};

/// Contact store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn relationship_from_row(row: &PgRow) -> Result<ContactRelationship, StoreError> {
    let status: String = row.try_get("status")?;
    let status = ContactStatus::parse(&status)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown contact status '{}'", status)))?;

    Ok(ContactRelationship {
        from_user_id: row.try_get("from_user_id")?,
        to_user_id: row.try_get("to_user_id")?,
        status,
        last_online: row.try_get("last_online")?,
    })
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn find(&self, from: &str, to: &str) -> Result<Option<ContactRelationship>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT from_user_id, to_user_id, status, last_online
            FROM contacts
            WHERE from_user_id = $1 AND to_user_id = $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(relationship_from_row).transpose()
    }

    async fn insert(&self, relationship: &ContactRelationship) -> Result<(), StoreError> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO contacts (from_user_id, to_user_id, status, last_online, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(&relationship.from_user_id)
        .bind(&relationship.to_user_id)
        .bind(relationship.status.as_str())
        .bind(relationship.last_online)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_status(
        &self,
        from: &str,
        to: &str,
        expected: Option<ContactStatus>,
        status: ContactStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET status = $1, updated_at = $2
            WHERE from_user_id = $3 AND to_user_id = $4
              AND ($5::TEXT IS NULL OR status = $5)
            "#,
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(from)
        .bind(to)
        .bind(expected.map(|s| s.as_str()))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_status(
        &self,
        from: &str,
        to: &str,
        expected: ContactStatus,
        status: ContactStatus,
    ) -> Result<Option<UpsertOutcome>, StoreError> {
        // xmax is zero only for a freshly inserted tuple
        let row = sqlx::query(
            r#"
            INSERT INTO contacts (from_user_id, to_user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (from_user_id, to_user_id)
            DO UPDATE SET status = EXCLUDED.status, updated_at = EXCLUDED.updated_at
            WHERE contacts.status = $5
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let inserted: bool = row.try_get("inserted")?;
        Ok(Some(if inserted {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Modified
        }))
    }

    async fn list_from(&self, user: &str) -> Result<Vec<ContactRelationship>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT from_user_id, to_user_id, status, last_online
            FROM contacts
            WHERE from_user_id = $1
            ORDER BY from_user_id, to_user_id
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(relationship_from_row).collect()
    }

    async fn list_involving(&self, user: &str) -> Result<Vec<ContactRelationship>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT from_user_id, to_user_id, status, last_online
            FROM contacts
            WHERE from_user_id = $1 OR to_user_id = $1
            ORDER BY from_user_id, to_user_id
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(relationship_from_row).collect()
    }

    async fn touch_last_online(&self, user: &str, at: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET last_online = $1
            WHERE to_user_id = $2
            "#,
        )
        .bind(at)
        .bind(user)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
