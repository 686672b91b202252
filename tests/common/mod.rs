#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use marketplace_api::application::services::JwtCredentialService;
use marketplace_api::domain::repositories::AccountRepository;
use marketplace_api::infrastructure::persistence::PgAccountRepository;
use marketplace_api::routes::{app_router, router};
use marketplace_api::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";

pub fn test_credentials() -> Arc<JwtCredentialService> {
    Arc::new(JwtCredentialService::new(TEST_SECRET, chrono::Duration::hours(1)))
}

pub fn create_test_state() -> AppState {
    AppState::in_memory(test_credentials())
}

pub fn make_server() -> TestServer {
    TestServer::new(router(create_test_state())).unwrap()
}

/// Server over the full app, trailing-slash normalization included.
pub fn make_app_server() -> TestServer {
    let app = app_router(create_test_state());
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

/// Registers `login` and returns its bearer token.
pub async fn register(server: &TestServer, login: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "login": login, "password": "secret123" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Creates a listing as the token's owner and returns its id.
pub async fn create_listing(server: &TestServer, token: &str, title: &str, price: f64) -> i64 {
    let response = server
        .post("/api/listings")
        .authorization_bearer(token)
        .json(&json!({
            "title": title,
            "description": "A thing for sale",
            "price": price,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}

pub fn pg_query_timeout() -> Duration {
    Duration::from_secs(5)
}

pub async fn create_test_account(pool: &PgPool, login: &str) -> i64 {
    PgAccountRepository::new(Arc::new(pool.clone()), pg_query_timeout())
        .create(login, "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .await
        .unwrap()
        .id
}
