mod common;

use axum::http::StatusCode;
use serde_json::Value;
use sqlx::PgPool;
use user_registry::routes::RateLimit;

/// One request per client, refilled far slower than a test runs.
fn single_request(behind_proxy: bool) -> RateLimit {
    RateLimit {
        replenish_ms: 60_000,
        burst: 1,
        behind_proxy,
    }
}

#[sqlx::test]
async fn test_trailing_slash_is_normalized(pool: PgPool) {
    let server = common::make_app_server(
        pool,
        RateLimit {
            replenish_ms: 1,
            burst: 50,
            behind_proxy: false,
        },
    );

    let response = server.get("/api/users/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), Value::Array(vec![]));

    server.get("/health/").await.assert_status_ok();
}

#[sqlx::test]
async fn test_api_is_rate_limited_per_client(pool: PgPool) {
    let server = common::make_app_server(pool, single_request(false));

    server.get("/api/users").await.assert_status_ok();

    server
        .get("/api/users")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test]
async fn test_health_is_not_rate_limited(pool: PgPool) {
    let server = common::make_app_server(pool, single_request(false));

    server.get("/api/users").await.assert_status_ok();

    for _ in 0..5 {
        server.get("/health").await.assert_status_ok();
    }
}

#[sqlx::test]
async fn test_proxy_mode_keys_on_forwarded_address(pool: PgPool) {
    let server = common::make_app_server(pool, single_request(true));

    server
        .get("/api/users")
        .add_header("x-forwarded-for", "203.0.113.7")
        .await
        .assert_status_ok();
    server
        .get("/api/users")
        .add_header("x-forwarded-for", "203.0.113.7")
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    server
        .get("/api/users")
        .add_header("x-forwarded-for", "198.51.100.20")
        .await
        .assert_status_ok();
}
