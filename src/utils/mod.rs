//! Helper functions shared across layers.
//!
//! - [`db_error`] - Classification of database constraint violations

pub mod db_error;
