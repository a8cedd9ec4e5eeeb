//! DTOs for the user endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{User, UserDraft};

/// Request body for `POST /api/users` and `PUT /api/users/{id}`.
///
/// `id` may be supplied on create and is then used as-is. On update it may be
/// omitted; if present it must equal the path identifier.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    /// ISO 8601 calendar date, e.g. `1990-01-31`.
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
}

impl From<UserRequest> for UserDraft {
    fn from(req: UserRequest) -> Self {
        UserDraft {
            id: req.id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            date_of_birth: req.date_of_birth,
            phone_number: req.phone_number,
        }
    }
}

/// A stored user as returned by create.
#[derive(Debug, Serialize)]
pub struct UserItem {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(u: User) -> Self {
        UserItem {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            date_of_birth: u.date_of_birth,
            phone_number: u.phone_number,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// A stored user plus its age in whole years, as returned by list and get.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: UserItem,
    pub age: i32,
}

impl UserResponse {
    pub fn new(user: User, age: i32) -> Self {
        Self {
            user: user.into(),
            age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_optional_fields() {
        let req: UserRequest = serde_json::from_value(json!({
            "first_name": "Alan",
            "email": "alan@example.com",
            "date_of_birth": "1912-06-23",
            "phone_number": "0123456789"
        }))
        .unwrap();

        assert!(req.id.is_none());
        assert!(req.last_name.is_none());
        assert_eq!(req.date_of_birth, NaiveDate::from_ymd_opt(1912, 6, 23).unwrap());
    }

    #[test]
    fn test_request_rejects_malformed_date() {
        let result = serde_json::from_value::<UserRequest>(json!({
            "first_name": "Alan",
            "email": "alan@example.com",
            "date_of_birth": "23/06/1912",
            "phone_number": "0123456789"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_response_is_flat() {
        let now = Utc::now();
        let user = User {
            id: Uuid::nil(),
            first_name: "Alan".to_string(),
            last_name: Some("Turing".to_string()),
            email: "alan@example.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone_number: "0123456789".to_string(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(UserResponse::new(user, 34)).unwrap();

        assert_eq!(value["age"], 34);
        assert_eq!(value["first_name"], "Alan");
        assert_eq!(value["date_of_birth"], "1990-01-01");
        assert!(value.get("user").is_none());
    }
}
