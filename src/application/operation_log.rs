//! Logging interface injected into services.
//!
//! Services report the lifecycle of each operation through [`OperationLog`]
//! instead of reaching for a global logger. The production implementation is
//! [`crate::infrastructure::logging::TracingOperationLog`].

use std::fmt;
use uuid::Uuid;

use crate::error::AppError;

/// A user operation exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list_users",
            Operation::Get => "get_user",
            Operation::Create => "create_user",
            Operation::Update => "update_user",
            Operation::Delete => "delete_user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives start, success and failure notifications for each operation.
///
/// `user_id` is the record the operation targets, when one is known.
#[cfg_attr(test, mockall::automock)]
pub trait OperationLog: Send + Sync {
    /// The operation was entered.
    fn started(&self, operation: Operation, user_id: Option<Uuid>);

    /// The operation completed.
    fn succeeded(&self, operation: Operation, user_id: Option<Uuid>);

    /// The operation was refused for an expected reason (bad input, missing record).
    fn rejected(&self, operation: Operation, user_id: Option<Uuid>, error: &AppError);

    /// The operation failed because of the service or its store.
    fn failed(&self, operation: Operation, user_id: Option<Uuid>, error: &AppError);
}
