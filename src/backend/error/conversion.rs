/**
 * Error Conversion
 *
 * This module converts the domain errors into `BackendError` and renders
 * `BackendError` and `ApiResponse` as HTTP responses.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "success": false,
 *   "message": "already rejected, cannot accept",
 *   "kind": "conflict"
 * }
 * ```
 */

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::auth::sessions::AuthError;
use crate::backend::contacts::machine::ContactError;
use crate::backend::error::types::{BackendError, StoreError};
use crate::backend::messaging::dispatcher::DispatchError;
use crate::shared::ApiResponse;

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        BackendError::storage(err)
    }
}

impl From<DispatchError> for BackendError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Invalid(shared) => BackendError::Shared(shared),
            DispatchError::NotFound(message) => BackendError::not_found(message),
            DispatchError::Store(store) => BackendError::storage(store),
        }
    }
}

impl From<ContactError> for BackendError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Invalid(shared) => BackendError::Shared(shared),
            ContactError::RecipientNotFound | ContactError::ContactNotFound => {
                BackendError::not_found(err.to_string())
            }
            ContactError::Conflict(reason) => BackendError::conflict(reason.to_string()),
            ContactError::NoChanges => BackendError::no_changes(err.to_string()),
            ContactError::Store(store) => BackendError::storage(store),
        }
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Issue(message) => BackendError::internal(message),
            other => BackendError::unauthorized(other.to_string()),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        BackendError::validation(rejection.body_text())
    }
}

impl IntoResponse for BackendError {
    /// Render the error as a JSON envelope with the mapped status code
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();

        if kind.is_retryable() {
            tracing::error!("[Http] {}", self);
        } else {
            tracing::debug!("[Http] {} {}: {}", status.as_u16(), kind.as_str(), self);
        }

        let body = ApiResponse::<()>::failure(kind.as_str(), self.message());
        (status, Json(body)).into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
