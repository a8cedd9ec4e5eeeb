//! Repository trait for user storage.

use crate::domain::entities::{User, UserDraft};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for persisting users.
///
/// Implementations store what they are given; all business rules are applied
/// by [`crate::application::services::UserService`] before a write reaches
/// the repository.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists all users, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Reports whether a user with this identifier exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, id: Uuid) -> Result<bool, AppError>;

    /// Reports whether any user other than `exclude_id` has this email,
    /// compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn email_taken(&self, email: &str, exclude_id: Option<Uuid>)
    -> Result<bool, AppError>;

    /// Inserts a new user under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the id or email collides with an
    /// existing row.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn create(&self, id: Uuid, draft: UserDraft) -> Result<User, AppError>;

    /// Replaces every mutable field of the user `id`.
    ///
    /// Returns `false` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the new email collides with another row.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn update(&self, id: Uuid, draft: UserDraft) -> Result<bool, AppError>;

    /// Removes the user `id`.
    ///
    /// Returns `false` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Round-trips a trivial query to verify connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Counts stored users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
