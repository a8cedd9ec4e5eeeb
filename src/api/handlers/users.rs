//! Handlers for the user resource (list, get, create, replace, delete).

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderName, StatusCode, header},
};
use serde_json::Value;
use uuid::Uuid;

use crate::api::dto::user::{UserItem, UserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all users with their derived age.
///
/// # Endpoint
///
/// `GET /api/users`
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let service = &state.user_service;
    let users = service.list_users().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| {
                let age = service.age_of(&u);
                UserResponse::new(u, age)
            })
            .collect(),
    ))
}

/// Returns one user with its derived age.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no user has this id (including ids that are not
/// valid UUIDs).
pub async fn get_user_handler(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let id = user_id(id)?;
    let user = state.user_service.get_user(id).await?;
    let age = state.user_service.age_of(&user);

    Ok(Json(UserResponse::new(user, age)))
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "id": "6f1c0a52-3f0e-4a5e-9a43-0d6f2b1b8c11",  // optional
///   "first_name": "Ada",
///   "last_name": "Lovelace",                       // optional
///   "email": "ada@example.com",
///   "date_of_birth": "1990-12-10",
///   "phone_number": "5551234567"
/// }
/// ```
///
/// # Response
///
/// 201 Created with the stored user and `Location: /api/users/{id}`.
///
/// # Errors
///
/// Returns 400 Bad Request with `{"message": ...}` if the body is malformed
/// or a validation rule fails.
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<UserItem>), AppError> {
    let Json(payload) = payload.map_err(body_rejected)?;

    let user = state.user_service.create_user(payload.into()).await?;
    let location = format!("/api/users/{}", user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user.into()),
    ))
}

/// Replaces every mutable field of a user.
///
/// # Endpoint
///
/// `PUT /api/users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the user does not exist.
/// Returns 400 Bad Request if the body is malformed, names a different id, or
/// a validation rule fails.
pub async fn update_user_handler(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = user_id(id)?;
    let Json(payload) = payload.map_err(body_rejected)?;

    state.user_service.update_user(id, payload.into()).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Permanently deletes a user.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the user does not exist.
pub async fn delete_user_handler(
    id: Result<Path<Uuid>, PathRejection>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = user_id(id)?;

    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// An id that does not parse cannot name an existing user.
fn user_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "Malformed user id");
            Err(AppError::not_found("User not found", Value::Null))
        }
    }
}

fn body_rejected(rejection: JsonRejection) -> AppError {
    tracing::warn!(reason = %rejection.body_text(), "Malformed request body");
    AppError::bad_request(rejection.body_text(), Value::Null)
}
