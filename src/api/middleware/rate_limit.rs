//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Creates a per-client rate limiter keyed on the socket peer address.
///
/// # Limits
///
/// - **Rate**: one token refilled every `replenish_ms` milliseconds
/// - **Burst**: up to `burst` requests at once
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// The router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer address
/// is available.
///
/// # Errors
///
/// Returns an error if `replenish_ms` or `burst` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api", api::routes::user_routes())
///     .layer(rate_limit::layer(100, 50)?);
/// ```
pub fn layer(
    replenish_ms: u64,
    burst: u32,
) -> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms)
            .burst_size(burst)
            .finish()
            .context("Invalid rate limit: period and burst must be greater than zero")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}

/// Same limits as [`layer`], keyed on the client address reported by a
/// reverse proxy (`X-Forwarded-For`, `X-Real-IP`, `Forwarded`), falling back
/// to the peer address.
///
/// Only use behind a proxy that overwrites these headers.
///
/// # Errors
///
/// Returns an error if `replenish_ms` or `burst` is zero.
pub fn proxy_layer(
    replenish_ms: u64,
    burst: u32,
) -> Result<GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_millisecond(replenish_ms)
            .burst_size(burst)
            .finish()
            .context("Invalid rate limit: period and burst must be greater than zero")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limits_rejected() {
        assert!(layer(0, 10).is_err());
        assert!(layer(10, 0).is_err());
        assert!(proxy_layer(0, 10).is_err());
    }

    #[test]
    fn test_valid_limits_accepted() {
        assert!(layer(100, 50).is_ok());
        assert!(proxy_layer(100, 50).is_ok());
    }
}
