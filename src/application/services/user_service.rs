//! User management service.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::application::operation_log::{Operation, OperationLog};
use crate::domain::age::{age_on, is_adult};
use crate::domain::entities::{User, UserDraft};
use crate::domain::repositories::UserRepository;
use crate::error::{AppError, EMAIL_NOT_UNIQUE, UNDERAGE};

/// Service for creating, reading, replacing and deleting users.
///
/// Every write goes through [`Self::validate`], so create and update apply
/// exactly the same rules. Each public operation reports its progress to the
/// injected [`OperationLog`].
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    log: Arc<dyn OperationLog>,
    clock: Arc<dyn Clock>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user storage
    /// - `log` - receives per-operation log events
    /// - `clock` - supplies the date the age rule is evaluated against
    pub fn new(repository: Arc<R>, log: Arc<dyn OperationLog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            log,
            clock,
        }
    }

    /// The UTC calendar date age is computed against.
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Age of `user` as of [`Self::today`].
    pub fn age_of(&self, user: &User) -> i32 {
        age_on(user.date_of_birth, self.today())
    }

    /// Checks a draft against every rule a stored user must satisfy.
    ///
    /// # Rule Order
    ///
    /// 1. Field rules declared on [`UserDraft`]
    /// 2. Email uniqueness, ignoring the record `existing_id` when updating
    /// 3. Minimum age
    ///
    /// The first failing rule determines the error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for the first violated rule.
    /// Returns [`AppError::Internal`] if the uniqueness query fails.
    pub async fn validate(
        &self,
        draft: &UserDraft,
        existing_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        draft.validate()?;

        if self
            .repository
            .email_taken(&draft.email, existing_id)
            .await?
        {
            return Err(AppError::bad_request(
                EMAIL_NOT_UNIQUE,
                json!({ "email": draft.email }),
            ));
        }

        if !is_adult(draft.date_of_birth, self.today()) {
            return Err(AppError::bad_request(
                UNDERAGE,
                json!({ "date_of_birth": draft.date_of_birth }),
            ));
        }

        Ok(())
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.log.started(Operation::List, None);
        let result = self.repository.list().await;
        self.finish(Operation::List, None, result)
    }

    /// Retrieves a single user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.log.started(Operation::Get, Some(id));
        let result = self.find_existing(id).await;
        self.finish(Operation::Get, Some(id), result)
    }

    /// Validates and stores a new user.
    ///
    /// The draft's `id` is used as-is when present; otherwise a random one is
    /// generated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any rule fails or the id is taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_user(&self, draft: UserDraft) -> Result<User, AppError> {
        let id = draft.id.unwrap_or_else(Uuid::new_v4);
        self.log.started(Operation::Create, Some(id));

        let result = async {
            self.validate(&draft, None).await?;
            self.repository.create(id, draft).await
        }
        .await;

        self.finish(Operation::Create, Some(id), result)
    }

    /// Replaces every mutable field of an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Validation`] if the draft carries a different id or
    /// any rule fails.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_user(&self, id: Uuid, draft: UserDraft) -> Result<(), AppError> {
        self.log.started(Operation::Update, Some(id));

        let result = async {
            if !self.repository.exists(id).await? {
                return Err(not_found(id));
            }

            if let Some(body_id) = draft.id
                && body_id != id
            {
                return Err(AppError::bad_request(
                    "Identifier in body does not match the URL.",
                    json!({ "id": id, "body_id": body_id }),
                ));
            }

            self.validate(&draft, Some(id)).await?;

            if self.repository.update(id, draft).await? {
                Ok(())
            } else {
                Err(not_found(id))
            }
        }
        .await;

        self.finish(Operation::Update, Some(id), result)
    }

    /// Permanently removes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.log.started(Operation::Delete, Some(id));

        let result = match self.repository.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(not_found(id)),
            Err(e) => Err(e),
        };

        self.finish(Operation::Delete, Some(id), result)
    }

    /// Reports whether a user exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn user_exists(&self, id: Uuid) -> Result<bool, AppError> {
        self.repository.exists(id).await
    }

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store does not answer.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn find_existing(&self, id: Uuid) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    fn finish<T>(
        &self,
        operation: Operation,
        user_id: Option<Uuid>,
        result: Result<T, AppError>,
    ) -> Result<T, AppError> {
        match &result {
            Ok(_) => self.log.succeeded(operation, user_id),
            Err(e) if e.is_expected() => self.log.rejected(operation, user_id, e),
            Err(e) => self.log.failed(operation, user_id, e),
        }
        result
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}
