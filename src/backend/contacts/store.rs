//! Contact persistence
//!
//! `ContactStore` holds directional relationship edges keyed by
//! `(from_user_id, to_user_id)`. Writes that move an existing edge are
//! compare-and-set on its current status so two racing requests cannot
//! both apply.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::backend::error::StoreError;
use crate::shared::messaging::{ContactRelationship, ContactStatus};

/// Whether an upsert overwrote an existing edge or created one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Modified,
    Inserted,
}

/// Persists directional contact edges
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Load the edge `from → to`
    async fn find(&self, from: &str, to: &str) -> Result<Option<ContactRelationship>, StoreError>;

    /// Create a new edge; `StoreError::Duplicate` if one already exists
    async fn insert(&self, relationship: &ContactRelationship) -> Result<(), StoreError>;

    /// Move `from → to` to `status` if its current status is `expected`
    ///
    /// `expected = None` skips the status guard but still requires the
    /// edge to exist. Returns whether a row matched.
    async fn update_status(
        &self,
        from: &str,
        to: &str,
        expected: Option<ContactStatus>,
        status: ContactStatus,
    ) -> Result<bool, StoreError>;

    /// Set `from → to` to `status`, creating the edge if needed
    ///
    /// An existing edge is only overwritten when its status is `expected`;
    /// otherwise nothing is written and `None` is returned.
    async fn upsert_status(
        &self,
        from: &str,
        to: &str,
        expected: ContactStatus,
        status: ContactStatus,
    ) -> Result<Option<UpsertOutcome>, StoreError>;

    /// Edges where `user` is the `from` side
    async fn list_from(&self, user: &str) -> Result<Vec<ContactRelationship>, StoreError>;

    /// Edges where `user` is on either side
    async fn list_involving(&self, user: &str) -> Result<Vec<ContactRelationship>, StoreError>;

    /// Stamp `last_online` on every edge pointing at `user`
    ///
    /// Returns the number of edges touched.
    async fn touch_last_online(&self, user: &str, at: DateTime<Utc>) -> Result<u64, StoreError>;
}

type EdgeKey = (String, String);

/// Contact store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    edges: RwLock<HashMap<EdgeKey, ContactRelationship>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored edges
    pub async fn len(&self) -> usize {
        self.edges.read().await.len()
    }
}

fn key(from: &str, to: &str) -> EdgeKey {
    (from.to_string(), to.to_string())
}

fn sorted(mut edges: Vec<ContactRelationship>) -> Vec<ContactRelationship> {
    edges.sort_by(|a, b| {
        (a.from_user_id.as_str(), a.to_user_id.as_str())
            .cmp(&(b.from_user_id.as_str(), b.to_user_id.as_str()))
    });
    edges
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn find(&self, from: &str, to: &str) -> Result<Option<ContactRelationship>, StoreError> {
        Ok(self.edges.read().await.get(&key(from, to)).cloned())
    }

    async fn insert(&self, relationship: &ContactRelationship) -> Result<(), StoreError> {
        let mut edges = self.edges.write().await;
        let edge_key = key(&relationship.from_user_id, &relationship.to_user_id);
        if edges.contains_key(&edge_key) {
            return Err(StoreError::Duplicate);
        }
        edges.insert(edge_key, relationship.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        from: &str,
        to: &str,
        expected: Option<ContactStatus>,
        status: ContactStatus,
    ) -> Result<bool, StoreError> {
        let mut edges = self.edges.write().await;
        match edges.get_mut(&key(from, to)) {
            Some(edge) if expected.is_none_or(|expected| edge.status == expected) => {
                edge.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn upsert_status(
        &self,
        from: &str,
        to: &str,
        expected: ContactStatus,
        status: ContactStatus,
    ) -> Result<Option<UpsertOutcome>, StoreError> {
        let mut edges = self.edges.write().await;
        match edges.get_mut(&key(from, to)) {
            Some(edge) if edge.status == expected => {
                edge.status = status;
                Ok(Some(UpsertOutcome::Modified))
            }
            Some(_) => Ok(None),
            None => {
                edges.insert(key(from, to), ContactRelationship::new(from, to, status));
                Ok(Some(UpsertOutcome::Inserted))
            }
        }
    }

    async fn list_from(&self, user: &str) -> Result<Vec<ContactRelationship>, StoreError> {
        let edges = self.edges.read().await;
        Ok(sorted(
            edges.values().filter(|e| e.from_user_id == user).cloned().collect(),
        ))
    }

    async fn list_involving(&self, user: &str) -> Result<Vec<ContactRelationship>, StoreError> {
        let edges = self.edges.read().await;
        Ok(sorted(edges.values().filter(|e| e.involves(user)).cloned().collect()))
    }

    async fn touch_last_online(&self, user: &str, at: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut edges = self.edges.write().await;
        let mut touched = 0;
        for edge in edges.values_mut().filter(|e| e.to_user_id == user) {
            edge.last_online = Some(at);
            touched += 1;
        }
        Ok(touched)
    }
}
