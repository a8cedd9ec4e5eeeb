//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Health check: database (public, not rate limited)
//! - `/api/users*`    - User resource (rate limited per client IP)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Rate limiter settings for the `/api` routes.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    /// Milliseconds between replenished tokens.
    pub replenish_ms: u64,
    /// Bucket size.
    pub burst: u32,
    /// Key on proxy-reported client address instead of the peer socket.
    pub behind_proxy: bool,
}

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(state: AppState, limits: RateLimit) -> Result<NormalizePath<Router>> {
    let api_router = api::routes::user_routes();
    let api_router = if limits.behind_proxy {
        api_router.layer(rate_limit::proxy_layer(limits.replenish_ms, limits.burst)?)
    } else {
        api_router.layer(rate_limit::layer(limits.replenish_ms, limits.burst)?)
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
