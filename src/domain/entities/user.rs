//! Domain entity representing a registered user.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Exactly ten ASCII digits, nothing else.
static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Dates of birth before 1 January of this year are rejected.
pub const EARLIEST_BIRTH_YEAR: i32 = 1900;

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_date_of_birth(date: &NaiveDate) -> Result<(), ValidationError> {
    if date.year() < EARLIEST_BIRTH_YEAR {
        return Err(ValidationError::new("date_of_birth_range"));
    }
    Ok(())
}

/// A persisted user record.
///
/// The `id` never changes after the row is inserted. `created_at` and
/// `updated_at` are maintained by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a user or replacing all mutable fields of one.
///
/// Field-level rules are declared here and checked by
/// [`crate::application::services::UserService::validate`], which also runs the
/// cross-record rules. `id` is only meaningful on create; when absent the
/// service generates one.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct UserDraft {
    pub id: Option<Uuid>,

    #[validate(
        length(
            min = 1,
            max = 128,
            message = "First name is required and must be at most 128 characters."
        ),
        custom(
            function = "validate_not_blank",
            message = "First name is required and must be at most 128 characters."
        )
    )]
    pub first_name: String,

    #[validate(length(max = 128, message = "Last name must be at most 128 characters."))]
    pub last_name: Option<String>,

    #[validate(email(message = "Email must be a valid email address."))]
    pub email: String,

    #[validate(custom(
        function = "validate_date_of_birth",
        message = "Date of birth must be on or after 1900-01-01."
    ))]
    pub date_of_birth: NaiveDate,

    #[validate(regex(
        path = *PHONE_NUMBER_REGEX,
        message = "Phone number must be exactly 10 digits."
    ))]
    pub phone_number: String,
}

impl UserDraft {
    /// Returns the draft with its identifier replaced.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> UserDraft {
        UserDraft {
            id: None,
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            email: "ada@example.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone_number: "5551234567".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_passes_field_rules() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn test_last_name_is_optional() {
        let draft = UserDraft {
            last_name: None,
            ..valid_draft()
        };

        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_empty_first_name_rejected() {
        for name in ["", "   ", "\t\n"] {
            let draft = UserDraft {
                first_name: name.to_string(),
                ..valid_draft()
            };

            let errors = draft.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("first_name"),
                "expected {name:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_first_name_with_surrounding_spaces_accepted() {
        let draft = UserDraft {
            first_name: " Ada ".to_string(),
            ..valid_draft()
        };

        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_date_of_birth_lower_bound() {
        let earliest = UserDraft {
            date_of_birth: NaiveDate::from_ymd_opt(EARLIEST_BIRTH_YEAR, 1, 1).unwrap(),
            ..valid_draft()
        };
        assert!(earliest.validate().is_ok());

        for date in [
            NaiveDate::from_ymd_opt(1899, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(-5000, 1, 1).unwrap(),
        ] {
            let draft = UserDraft {
                date_of_birth: date,
                ..valid_draft()
            };

            let errors = draft.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("date_of_birth"),
                "expected {date} to be rejected"
            );
        }
    }

    #[test]
    fn test_first_name_length_limit() {
        let at_limit = UserDraft {
            first_name: "a".repeat(128),
            ..valid_draft()
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = UserDraft {
            first_name: "a".repeat(129),
            ..valid_draft()
        };
        assert!(over_limit.validate().is_err());
    }

    #[test]
    fn test_last_name_length_limit() {
        let draft = UserDraft {
            last_name: Some("b".repeat(129)),
            ..valid_draft()
        };

        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("last_name"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["", "not-an-email", "missing@", "@example.com"] {
            let draft = UserDraft {
                email: email.to_string(),
                ..valid_draft()
            };

            let errors = draft.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("email"),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_phone_number_must_be_ten_digits() {
        for phone in ["555123456", "55512345678", "555-123-45", "555123456a", ""] {
            let draft = UserDraft {
                phone_number: phone.to_string(),
                ..valid_draft()
            };

            let errors = draft.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("phone_number"),
                "expected {phone:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_with_id_sets_identifier() {
        let id = Uuid::new_v4();
        let draft = valid_draft().with_id(id);

        assert_eq!(draft.id, Some(id));
    }
}
