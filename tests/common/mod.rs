#![allow(dead_code)]

use axum::Router;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use mockable::MockClock;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use user_registry::api::handlers::health_handler;
use user_registry::api::routes::user_routes;
use user_registry::application::services::UserService;
use user_registry::infrastructure::logging::TracingOperationLog;
use user_registry::infrastructure::persistence::PgUserRepository;
use user_registry::routes::{RateLimit, app_router};
use user_registry::state::AppState;
use uuid::Uuid;

/// Date every test state evaluates ages against.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// A clock stopped at midnight UTC on [`today`].
pub fn test_clock() -> MockClock {
    let now = Utc.from_utc_datetime(&today().and_time(NaiveTime::MIN));
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    clock
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let repository = Arc::new(PgUserRepository::new(Arc::new(pool)));
    let user_service = UserService::new(
        repository,
        Arc::new(TracingOperationLog::new()),
        Arc::new(test_clock()),
    );

    AppState::new(Arc::new(user_service))
}

/// Router with the API and health routes but without rate limiting, which
/// needs a real peer address.
pub fn make_server(pool: PgPool) -> TestServer {
    let state = create_test_state(pool);
    let app = Router::new()
        .route("/health", axum::routing::get(health_handler))
        .nest("/api", user_routes())
        .with_state(state);
    TestServer::new(app).unwrap()
}

/// The production router, served over a real socket so the rate limiter sees
/// the peer address.
pub fn make_app_server(pool: PgPool, limits: RateLimit) -> TestServer {
    let app = app_router(create_test_state(pool), limits).unwrap();
    TestServer::builder()
        .http_transport()
        .build(ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app))
        .unwrap()
}

pub async fn insert_user(pool: &PgPool, email: &str, date_of_birth: NaiveDate) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO users (id, first_name, last_name, email, date_of_birth, phone_number)
         VALUES ($1, 'Test', 'User', $2, $3, '5550000000')",
    )
    .bind(id)
    .bind(email)
    .bind(date_of_birth)
    .execute(pool)
    .await
    .unwrap();
    id
}

pub async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}
