//! Log output: subscriber setup and the `tracing`-backed [`OperationLog`].

use anyhow::{Context, Result};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::application::operation_log::{Operation, OperationLog};
use crate::error::AppError;

/// Installs the global `tracing` subscriber.
///
/// `filter` uses `RUST_LOG` syntax; `format` is `"json"` for one JSON object
/// per line, anything else selects the human-readable formatter.
///
/// # Errors
///
/// Returns an error if `filter` cannot be parsed or a subscriber is already set.
pub fn init_tracing(filter: &str, format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .with_context(|| format!("Invalid log filter '{filter}'"))?;

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    let installed = if format == "json" {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    installed
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to install tracing subscriber")
}

/// Writes operation events through `tracing`.
///
/// | event | level |
/// |---|---|
/// | started | INFO |
/// | succeeded | INFO |
/// | rejected | WARN |
/// | failed | ERROR |
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOperationLog;

impl TracingOperationLog {
    pub fn new() -> Self {
        Self
    }
}

impl OperationLog for TracingOperationLog {
    fn started(&self, operation: Operation, user_id: Option<Uuid>) {
        tracing::info!(
            operation = operation.as_str(),
            user_id = user_id.map(|id| id.to_string()),
            "Handling request"
        );
    }

    fn succeeded(&self, operation: Operation, user_id: Option<Uuid>) {
        tracing::info!(
            operation = operation.as_str(),
            user_id = user_id.map(|id| id.to_string()),
            "Request completed"
        );
    }

    fn rejected(&self, operation: Operation, user_id: Option<Uuid>, error: &AppError) {
        tracing::warn!(
            operation = operation.as_str(),
            user_id = user_id.map(|id| id.to_string()),
            reason = %error,
            details = %render_details(error.details()),
            "Request rejected"
        );
    }

    fn failed(&self, operation: Operation, user_id: Option<Uuid>, error: &AppError) {
        tracing::error!(
            operation = operation.as_str(),
            user_id = user_id.map(|id| id.to_string()),
            reason = %error,
            details = %render_details(error.details()),
            "Request failed"
        );
    }
}

fn render_details(details: &Value) -> String {
    if details.is_null() {
        "-".to_string()
    } else {
        details.to_string()
    }
}
