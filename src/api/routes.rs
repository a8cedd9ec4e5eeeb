//! API route configuration.

use crate::api::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// User resource routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /users`        - List users with derived age
/// - `POST   /users`        - Create a user
/// - `GET    /users/{id}`   - Get one user with derived age
/// - `PUT    /users/{id}`   - Replace all mutable fields of a user
/// - `DELETE /users/{id}`   - Hard-delete a user
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
}
