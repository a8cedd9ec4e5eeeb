//! Application error type and its HTTP mapping.
//!
//! | variant | status | body |
//! |---|---|---|
//! | [`AppError::Validation`] | 400 | `{"message": ..., "details": ...}` |
//! | [`AppError::NotFound`] | 404 | empty |
//! | [`AppError::Internal`] | 500 | `{"message": "An unexpected error occurred."}` |
//!
//! Internal details are kept on the error for logging and never written to
//! the response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::utils::db_error::{is_unique_violation_on_email, is_unique_violation_on_id};

pub const EMAIL_NOT_UNIQUE: &str = "Email must be unique.";
pub const UNDERAGE: &str = "User must be 18 years or older.";
pub const ID_NOT_UNIQUE: &str = "A user with this id already exists.";
const INTERNAL_MESSAGE: &str = "An unexpected error occurred.";

/// Order in which field rule failures are reported; the first one wins.
const FIELD_ORDER: [&str; 5] = [
    "first_name",
    "last_name",
    "email",
    "date_of_birth",
    "phone_number",
];

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Expected outcomes of a request (bad input, missing record), as opposed
    /// to failures of the service itself.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    pub fn details(&self) -> &Value {
        match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }

    /// Message followed by the details, for operator-facing output.
    pub fn describe(&self) -> String {
        match self.details() {
            Value::Null => self.to_string(),
            details => format!("{self} ({details})"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { message, details }),
            )
                .into_response(),
            AppError::NotFound { .. } => StatusCode::NOT_FOUND.into_response(),
            AppError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: INTERNAL_MESSAGE.to_string(),
                    details: Value::Null,
                }),
            )
                .into_response(),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_email(&e) {
            return AppError::bad_request(EMAIL_NOT_UNIQUE, Value::Null);
        }
        if is_unique_violation_on_id(&e) {
            return AppError::bad_request(ID_NOT_UNIQUE, Value::Null);
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();

        let mut details = Map::new();
        for (field, errs) in &field_errors {
            let messages: Vec<Value> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| json!(e.code), |m| json!(m))
                })
                .collect();
            details.insert(field.to_string(), Value::Array(messages));
        }

        let first = FIELD_ORDER
            .iter()
            .find_map(|field| field_errors.get(*field))
            .or_else(|| field_errors.values().next())
            .and_then(|errs| errs.first());

        let message = match first {
            Some(err) => err
                .message
                .as_ref()
                .map_or_else(|| format!("Invalid value: {}", err.code), |m| m.to_string()),
            None => nested_message(&errors),
        };

        AppError::bad_request(message, Value::Object(details))
    }
}

/// Fallback when the only failures sit below nested structs or lists.
fn nested_message(errors: &ValidationErrors) -> String {
    let has_nested = errors.errors().values().any(|kind| {
        matches!(
            kind,
            ValidationErrorsKind::Struct(_) | ValidationErrorsKind::List(_)
        )
    });

    if has_nested {
        "Invalid nested value".to_string()
    } else {
        "Invalid request".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
        ValidationError::new(code).with_message(message.into())
    }

    #[test]
    fn test_validation_errors_report_first_field_in_order() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "phone_number",
            error_with_message("regex", "Phone number must be exactly 10 digits."),
        );
        errors.add(
            "email",
            error_with_message("email", "Email must be a valid email address."),
        );

        let err = AppError::from(errors);

        match err {
            AppError::Validation { message, details } => {
                assert_eq!(message, "Email must be a valid email address.");
                assert!(details.get("phone_number").is_some());
                assert!(details.get("email").is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_date_of_birth_reported_before_phone_number() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "phone_number",
            error_with_message("regex", "Phone number must be exactly 10 digits."),
        );
        errors.add(
            "date_of_birth",
            error_with_message(
                "date_of_birth_range",
                "Date of birth must be on or after 1900-01-01.",
            ),
        );

        let err = AppError::from(errors);

        assert_eq!(
            err.to_string(),
            "Date of birth must be on or after 1900-01-01."
        );
    }

    #[test]
    fn test_validation_error_without_message_uses_code() {
        let mut errors = ValidationErrors::new();
        errors.add("first_name", ValidationError::new("length"));

        let err = AppError::from(errors);

        assert_eq!(err.to_string(), "Invalid value: length");
    }

    #[test]
    fn test_not_found_response_has_empty_body() {
        let response = AppError::not_found("User not found", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE),
            None
        );
    }

    #[test]
    fn test_internal_response_status() {
        let response =
            AppError::internal("Database error", json!({"reason": "boom"})).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_response_status() {
        let response = AppError::bad_request(EMAIL_NOT_UNIQUE, Value::Null).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_is_expected() {
        assert!(AppError::bad_request("x", Value::Null).is_expected());
        assert!(AppError::not_found("x", Value::Null).is_expected());
        assert!(!AppError::internal("x", Value::Null).is_expected());
    }

    #[test]
    fn test_describe_includes_details() {
        let err = AppError::internal("Database error", json!({"reason": "connection refused"}));

        assert_eq!(
            err.describe(),
            r#"Database error ({"reason":"connection refused"})"#
        );
        assert_eq!(
            AppError::bad_request(EMAIL_NOT_UNIQUE, Value::Null).describe(),
            EMAIL_NOT_UNIQUE
        );
    }

    #[test]
    fn test_non_database_sqlx_error_is_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);

        assert!(matches!(err, AppError::Internal { .. }));
    }
}
