/**
 * API Route Handlers
 *
 * This module wires the REST endpoints.
 *
 * # Routes
 *
 * ## Messages
 * - `POST /message/sent` - Send a message
 * - `GET /message/get` - Messages from `username` to `recipient`
 * - `GET /message/conversation` - Both directions between two users
 * - `PATCH /message/edit` - Edit a sent message
 * - `DELETE /message/delete` - Delete a sent message
 *
 * ## Contacts
 * - `POST /contact/add` - Add a contact or respond to a request
 * - `POST /contact/action` - Block or remove a contact
 * - `GET /contact/get` - List relationships
 *
 * ## Authentication
 * - `POST /auth/signup` - User registration
 * - `POST /auth/login` - User login
 * - `GET /auth/me` - Get current user info
 */

use axum::Router;

use crate::backend::auth::{get_me, login, signup};
use crate::backend::contacts::handlers::{add_contact, contact_action, get_contacts};
use crate::backend::messaging::handlers::{
    delete_message, edit_message, get_conversation, get_messages, send_message,
};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Authentication
///
/// `/auth/signup` and `/auth/login` are public. Every other route
/// requires a JWT in the `Authorization` header, checked by the
/// `AuthUser` extractor in each handler.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Message endpoints
        .route("/message/sent", axum::routing::post(send_message))
        .route("/message/get", axum::routing::get(get_messages))
        .route("/message/conversation", axum::routing::get(get_conversation))
        .route("/message/edit", axum::routing::patch(edit_message))
        .route("/message/delete", axum::routing::delete(delete_message))
        // Contact endpoints
        .route("/contact/add", axum::routing::post(add_contact))
        .route("/contact/action", axum::routing::post(contact_action))
        .route("/contact/get", axum::routing::get(get_contacts))
        // Authentication endpoints
        .route("/auth/signup", axum::routing::post(signup))
        .route("/auth/login", axum::routing::post(login))
        .route("/auth/me", axum::routing::get(get_me))
}
