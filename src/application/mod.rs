//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! - [`services::user_service::UserService`] - User CRUD with the unified validation routine
//! - [`operation_log::OperationLog`] - Per-operation logging interface injected into services

pub mod operation_log;
pub mod services;
