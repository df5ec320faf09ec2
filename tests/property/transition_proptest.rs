//! Property-based tests for the contact transition table
//!
//! Uses proptest to drive arbitrary request sequences through the pure
//! transition functions and through the in-memory state machine.

use proptest::prelude::*;
use std::sync::Arc;
use xfchat::backend::auth::InMemoryUserDirectory;
use xfchat::backend::contacts::{
    next_action_state, next_state, ContactStateMachine, ContactStore, InMemoryContactStore,
    Transition,
};
use xfchat::shared::messaging::{ContactAction, ContactActionRequest, ContactRequest, ContactStatus};

fn any_status() -> impl Strategy<Value = ContactStatus> {
    prop::sample::select(ContactStatus::ALL.to_vec())
}

fn requestable_status() -> impl Strategy<Value = ContactStatus> {
    prop::sample::select(vec![
        ContactStatus::Pending,
        ContactStatus::Accepted,
        ContactStatus::Rejected,
    ])
}

fn any_action() -> impl Strategy<Value = ContactAction> {
    prop_oneof![Just(ContactAction::Block), Just(ContactAction::Remove)]
}

proptest! {
    #[test]
    fn test_blocked_only_accepts_pending(requested in requestable_status()) {
        let result = next_state(Some(ContactStatus::Blocked), requested);
        if requested == ContactStatus::Pending {
            prop_assert_eq!(result, Ok(Transition::Update(ContactStatus::Pending)));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn test_actions_only_apply_to_accepted(
        current in prop::option::of(any_status()),
        action in any_action(),
    ) {
        let result = next_action_state(current, action);
        prop_assert_eq!(result.is_ok(), current == Some(ContactStatus::Accepted));
    }

    #[test]
    fn test_only_pending_creates_from_nothing(requested in requestable_status()) {
        let inserts = matches!(next_state(None, requested), Ok(Transition::Insert));
        prop_assert_eq!(inserts, requested == ContactStatus::Pending);
    }

    #[test]
    fn test_actions_are_never_requestable(current in prop::option::of(any_status())) {
        prop_assert!(next_state(current, ContactStatus::Blocked).is_err());
        prop_assert!(next_state(current, ContactStatus::Removed).is_err());
    }
}

#[derive(Debug, Clone)]
enum Step {
    Request(ContactStatus),
    Action(ContactAction),
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        requestable_status().prop_map(Step::Request),
        any_action().prop_map(Step::Action),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever the sequence, there is at most one alice -> bob edge and
    /// a failed call leaves it untouched.
    #[test]
    fn test_machine_keeps_one_edge(steps in prop::collection::vec(any_step(), 1..12)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let store = Arc::new(InMemoryContactStore::new());
            let users = Arc::new(InMemoryUserDirectory::with_usernames(["alice", "bob"]));
            let machine = ContactStateMachine::new(store.clone(), users, true);

            for step in steps {
                let before = store.find("alice", "bob").await.unwrap().map(|e| e.status);
                let result = match step {
                    Step::Request(status) => machine
                        .handle_request(&ContactRequest::new("alice", "bob", status.as_str()))
                        .await
                        .map(|o| o.status),
                    Step::Action(action) => machine
                        .update_contact(&ContactActionRequest::new("alice", "bob", action.as_str()))
                        .await
                        .map(|o| o.status),
                };
                let after = store.find("alice", "bob").await.unwrap().map(|e| e.status);

                match result {
                    Ok(status) => prop_assert_eq!(after, Some(status)),
                    Err(_) => prop_assert_eq!(after, before),
                }
                prop_assert!(store.len().await <= 1);
            }
            Ok(())
        })?;
    }
}
