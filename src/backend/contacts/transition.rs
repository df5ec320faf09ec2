//! Contact transition table
//!
//! Pure functions deciding what a contact request or action does to a
//! relationship edge, given only its current status. Nothing here touches
//! a store, so the whole table is testable in isolation.
//!
//! | current \ requested | pending         | accepted          | rejected          |
//! |---------------------|-----------------|-------------------|-------------------|
//! | none                | insert          | upsert            | update (no match) |
//! | pending             | no-op           | update            | update            |
//! | accepted            | conflict        | no-op             | conflict          |
//! | rejected            | update          | conflict          | no-op             |
//! | blocked / removed   | update          | conflict          | conflict          |

use thiserror::Error;

use crate::shared::messaging::{ContactAction, ContactStatus};

/// What a request does to the stored edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Create a new edge with status `pending`
    Insert,
    /// Guarded update from the current status to the given one
    Update(ContactStatus),
    /// Create or overwrite the edge with the given status
    Upsert(ContactStatus),
    /// Leave the edge as it is
    NoOp(NoOpReason),
}

/// Why a request left the edge untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    AlreadyPending,
    AlreadyAccepted,
    AlreadyRejected,
}

impl NoOpReason {
    pub fn message(&self) -> &'static str {
        match self {
            NoOpReason::AlreadyPending => "contact request already in pending state",
            NoOpReason::AlreadyAccepted => "contact request already accepted",
            NoOpReason::AlreadyRejected => "contact request already rejected",
        }
    }
}

/// Why a request or action is illegal from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictReason {
    #[error("already accepted, cannot change to pending")]
    AcceptedToPending,

    #[error("already rejected, cannot accept")]
    RejectedToAccepted,

    #[error("already accepted, can only remove or block")]
    AcceptedToRejected,

    #[error("contact is {0}; send a pending request first")]
    RequiresPendingFirst(ContactStatus),

    #[error("status {0} cannot be requested, use a contact action")]
    NotRequestable(ContactStatus),

    #[error("cannot block or remove, contact is not connected")]
    NotConnected,

    #[error("contact request already exists")]
    AlreadyExists,
}

/// Decide the effect of requesting `requested` on an edge in `current`
pub fn next_state(
    current: Option<ContactStatus>,
    requested: ContactStatus,
) -> Result<Transition, ConflictReason> {
    use ContactStatus::*;

    if !requested.is_requestable() {
        return Err(ConflictReason::NotRequestable(requested));
    }

    match (current, requested) {
        (Some(status @ (Blocked | Removed)), Accepted | Rejected) => {
            Err(ConflictReason::RequiresPendingFirst(status))
        }

        (None, Pending) => Ok(Transition::Insert),
        (Some(Pending), Pending) => Ok(Transition::NoOp(NoOpReason::AlreadyPending)),
        (Some(Accepted), Pending) => Err(ConflictReason::AcceptedToPending),
        (Some(Rejected | Blocked | Removed), Pending) => Ok(Transition::Update(Pending)),

        (None, Accepted) => Ok(Transition::Upsert(Accepted)),
        (Some(Pending), Accepted) => Ok(Transition::Update(Accepted)),
        (Some(Accepted), Accepted) => Ok(Transition::NoOp(NoOpReason::AlreadyAccepted)),
        (Some(Rejected), Accepted) => Err(ConflictReason::RejectedToAccepted),

        (None | Some(Pending), Rejected) => Ok(Transition::Update(Rejected)),
        (Some(Accepted), Rejected) => Err(ConflictReason::AcceptedToRejected),
        (Some(Rejected), Rejected) => Ok(Transition::NoOp(NoOpReason::AlreadyRejected)),

        (_, Blocked | Removed) => Err(ConflictReason::NotRequestable(requested)),
    }
}

/// Decide the status an accepted edge moves to under `action`
///
/// Only an accepted edge can be blocked or removed; an absent edge is
/// never created by an action.
pub fn next_action_state(
    current: Option<ContactStatus>,
    action: ContactAction,
) -> Result<ContactStatus, ConflictReason> {
    match current {
        Some(ContactStatus::Accepted) => Ok(action.target_status()),
        _ => Err(ConflictReason::NotConnected),
    }
}
