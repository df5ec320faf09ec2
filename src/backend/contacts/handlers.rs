//! Contact HTTP Handlers
//!
//! Adding contacts, moving requests between states, blocking or removing
//! contacts, and listing relationships.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::contacts::machine::{ContactOutcome, ContactStateMachine};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::messaging::{
    ContactActionRequest, ContactRelationship, ContactRequest, ContactScope, ContactStatus,
};
use crate::shared::ApiResponse;

/// Payload returned after a request or action
#[derive(Debug, Serialize)]
pub struct ContactResult {
    pub status: ContactStatus,
    pub changed: bool,
}

impl ContactResult {
    fn respond(outcome: ContactOutcome) -> ApiResponse<ContactResult> {
        ApiResponse::ok(
            outcome.message,
            ContactResult {
                status: outcome.status,
                changed: outcome.changed,
            },
        )
    }
}

/// Query string for `GET /contact/get`
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    pub username: Option<String>,
    pub scope: Option<String>,
}

fn parse_scope(scope: Option<&str>) -> Result<ContactScope, BackendError> {
    match scope.map(str::trim) {
        None | Some("") | Some("outbound") => Ok(ContactScope::Outbound),
        Some("all") => Ok(ContactScope::All),
        Some(other) => Err(BackendError::validation(format!(
            "invalid scope '{}', expected outbound or all",
            other
        ))),
    }
}

/// Add a contact or respond to a request
pub async fn add_contact(
    State(contacts): State<ContactStateMachine>,
    AuthUser(user): AuthUser,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<ApiResponse<ContactResult>, BackendError> {
    let Json(request) = payload?;
    user.ensure_is(&request.from_user_id)?;

    let outcome = contacts.handle_request(&request).await?;
    Ok(ContactResult::respond(outcome))
}

/// Block or remove an accepted contact
pub async fn contact_action(
    State(contacts): State<ContactStateMachine>,
    AuthUser(user): AuthUser,
    payload: Result<Json<ContactActionRequest>, JsonRejection>,
) -> Result<ApiResponse<ContactResult>, BackendError> {
    let Json(request) = payload?;
    user.ensure_is(&request.user_id)?;

    let outcome = contacts.update_contact(&request).await?;
    Ok(ContactResult::respond(outcome))
}

/// List a user's relationships
pub async fn get_contacts(
    State(contacts): State<ContactStateMachine>,
    AuthUser(user): AuthUser,
    query: Result<Query<ContactQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<ContactRelationship>>, BackendError> {
    let Query(query) = query?;
    let username = query
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| BackendError::validation("username is required"))?;
    user.ensure_is(&username)?;
    let scope = parse_scope(query.scope.as_deref())?;

    let relationships = contacts.contacts(&username, scope).await?;
    Ok(ApiResponse::ok("Contacts fetched successfully", relationships))
}
