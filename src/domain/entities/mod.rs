//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`User`] - A persisted user record
//! - [`UserDraft`] - Input data for creating or replacing a user, carrying the
//!   declarative field rules

pub mod user;

pub use user::{User, UserDraft};
