/**
 * Contact State Machine
 *
 * Applies contact requests and actions to relationship edges. The
 * decision of what a request means is made by `transition::next_state`;
 * this module validates input, loads the current edge, and performs the
 * store write the transition calls for.
 *
 * # Flows
 *
 * - `handle_request` - add a contact or move a request between pending,
 *   accepted and rejected
 * - `update_contact` - block or remove an accepted contact
 * - `contacts` - list edges for a user, directional or symmetric
 * - `record_last_online` - stamp presence on edges pointing at a user
 */

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::users::UserDirectory;
use crate::backend::contacts::store::{ContactStore, UpsertOutcome};
use crate::backend::contacts::transition::{next_action_state, next_state, ConflictReason, Transition};
use crate::backend::error::StoreError;
use crate::shared::messaging::{
    ContactAction, ContactActionRequest, ContactRelationship, ContactRequest, ContactScope,
    ContactStatus,
};
use crate::shared::SharedError;

/// Errors returned by the contact state machine
#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Invalid(#[from] SharedError),

    #[error("recipient does not exist")]
    RecipientNotFound,

    #[error("contact does not exist")]
    ContactNotFound,

    #[error(transparent)]
    Conflict(#[from] ConflictReason),

    #[error("no changes made, send a pending request first")]
    NoChanges,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ContactError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ContactError::Conflict(ConflictReason::AlreadyExists),
            other => ContactError::Store(other),
        }
    }
}

/// Result of a successful request or action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactOutcome {
    /// Status of the edge after the call
    pub status: ContactStatus,
    /// Human-readable description of what happened
    pub message: &'static str,
    /// Whether the store was written
    pub changed: bool,
}

impl ContactOutcome {
    fn changed(status: ContactStatus, message: &'static str) -> Self {
        Self { status, message, changed: true }
    }

    fn unchanged(status: ContactStatus, message: &'static str) -> Self {
        Self { status, message, changed: false }
    }
}

fn update_message(status: ContactStatus) -> &'static str {
    match status {
        ContactStatus::Pending => "Contact request updated to pending",
        ContactStatus::Accepted => "Contact request accepted",
        ContactStatus::Rejected => "Contact request rejected",
        ContactStatus::Blocked => "Contact blocked successfully",
        ContactStatus::Removed => "Contact removed successfully",
    }
}

/// Validates and applies relationship transitions
#[derive(Clone)]
pub struct ContactStateMachine {
    store: Arc<dyn ContactStore>,
    users: Arc<dyn UserDirectory>,
    accept_creates_entry: bool,
}

impl ContactStateMachine {
    pub fn new(
        store: Arc<dyn ContactStore>,
        users: Arc<dyn UserDirectory>,
        accept_creates_entry: bool,
    ) -> Self {
        Self { store, users, accept_creates_entry }
    }

    /// Add a contact or move an existing request along
    pub async fn handle_request(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactOutcome, ContactError> {
        let requested = request.validate()?;
        let from = request.from_user_id.as_str();
        let to = request.to_user_id.as_str();

        if !self.users.exists(to).await? {
            return Err(ContactError::RecipientNotFound);
        }

        let current = self.store.find(from, to).await?.map(|edge| edge.status);
        let transition = next_state(current, requested).inspect_err(|reason| {
            tracing::info!("[Contacts] {} -> {} refused: {}", from, to, reason);
        })?;

        let outcome = match transition {
            Transition::Insert => {
                self.store
                    .insert(&ContactRelationship::new(from, to, ContactStatus::Pending))
                    .await?;
                ContactOutcome::changed(ContactStatus::Pending, "Contact request sent successfully")
            }
            Transition::Update(status) => {
                if !self.store.update_status(from, to, current, status).await? {
                    return Err(ContactError::NoChanges);
                }
                ContactOutcome::changed(status, update_message(status))
            }
            Transition::Upsert(status) => {
                if !self.accept_creates_entry {
                    return Err(ContactError::NoChanges);
                }
                let upserted = self
                    .store
                    .upsert_status(from, to, ContactStatus::Pending, status)
                    .await?;
                let message = match upserted {
                    Some(UpsertOutcome::Modified) => "Contact request accepted",
                    Some(UpsertOutcome::Inserted) => "Contact request accepted as a new entry",
                    None => return Err(ContactError::NoChanges),
                };
                ContactOutcome::changed(status, message)
            }
            Transition::NoOp(reason) => {
                ContactOutcome::unchanged(current.unwrap_or(requested), reason.message())
            }
        };

        tracing::info!(
            "[Contacts] {} -> {} now {}: {}",
            from,
            to,
            outcome.status,
            outcome.message
        );
        Ok(outcome)
    }

    /// Block or remove an accepted contact
    pub async fn update_contact(
        &self,
        request: &ContactActionRequest,
    ) -> Result<ContactOutcome, ContactError> {
        let action = request.validate()?;
        let user = request.user_id.as_str();
        let contact = request.contact_id.as_str();

        if !self.users.exists(contact).await? {
            return Err(ContactError::ContactNotFound);
        }

        let current = self.store.find(user, contact).await?.map(|edge| edge.status);
        let target = next_action_state(current, action)?;

        let applied = self
            .store
            .update_status(user, contact, Some(ContactStatus::Accepted), target)
            .await?;
        if !applied {
            return Err(ConflictReason::NotConnected.into());
        }

        tracing::info!("[Contacts] {} applied {} to {}", user, action.as_str(), contact);
        Ok(ContactOutcome::changed(
            target,
            match action {
                ContactAction::Block => "Contact blocked successfully",
                ContactAction::Remove => "Contact removed successfully",
            },
        ))
    }

    /// Edges where `user` is the `from` side
    pub async fn contacts_from(&self, user: &str) -> Result<Vec<ContactRelationship>, ContactError> {
        Ok(self.store.list_from(user).await?)
    }

    /// Edges where `user` is on either side
    pub async fn contacts_of(&self, user: &str) -> Result<Vec<ContactRelationship>, ContactError> {
        Ok(self.store.list_involving(user).await?)
    }

    pub async fn contacts(
        &self,
        user: &str,
        scope: ContactScope,
    ) -> Result<Vec<ContactRelationship>, ContactError> {
        match scope {
            ContactScope::Outbound => self.contacts_from(user).await,
            ContactScope::All => self.contacts_of(user).await,
        }
    }

    /// Stamp `last_online` on every edge pointing at `user`
    pub async fn record_last_online(&self, user: &str) -> Result<u64, ContactError> {
        let touched = self.store.touch_last_online(user, Utc::now()).await?;
        tracing::debug!("[Contacts] Stamped last online for {} on {} edges", user, touched);
        Ok(touched)
    }
}
