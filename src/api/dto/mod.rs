//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Field rules
//! live on [`crate::domain::entities::UserDraft`], not here.

pub mod health;
pub mod user;
