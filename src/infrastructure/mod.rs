//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`logging`] - Subscriber setup and the `tracing`-backed operation log

pub mod logging;
pub mod persistence;
