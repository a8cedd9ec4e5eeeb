//! Domain layer containing business entities and rules.
//!
//! Nothing in here depends on HTTP or on a concrete database driver.
//!
//! # Architecture
//!
//! - [`entities`] - The user record and the write payload with its field rules
//! - [`repositories`] - Data access trait definitions
//! - [`age`] - Calendar-aware age derivation
//!
//! # Design Principles
//!
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Cross-record rules (email uniqueness, age) run in
//!   [`crate::application::services::UserService`]

pub mod age;
pub mod entities;
pub mod repositories;
