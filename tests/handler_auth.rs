mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_register_success() {
    let server = common::make_server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "login": "alice_1", "password": "secret123" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["user"]["login"], "alice_1");
    assert!(body["data"]["user"]["id"].is_i64());
    assert!(body["data"]["user"].get("password_hash").is_none());
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_register_duplicate_login_conflict() {
    let server = common::make_server();
    common::register(&server, "alice").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "login": "alice", "password": "other456" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "User with this login already exists");
}

#[tokio::test]
async fn test_register_invalid_login() {
    let server = common::make_server();

    for login in ["ab", "bad login", "dash-name"] {
        let response = server
            .post("/api/auth/register")
            .json(&json!({ "login": login, "password": "secret123" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "bad_request");
    }
}

#[tokio::test]
async fn test_register_weak_password() {
    let server = common::make_server();

    for password in ["abc12", "onlyletters", "12345678"] {
        let response = server
            .post("/api/auth/register")
            .json(&json!({ "login": "bob", "password": password }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_register_malformed_body() {
    let server = common::make_server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "login": "bob" }))
        .await;

    response.assert_status_bad_request();

    let body = response.json::<Value>();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request format")
    );
}

#[tokio::test]
async fn test_login_success() {
    let server = common::make_server();
    common::register(&server, "carol").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "login": "carol", "password": "secret123" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["login"], "carol");
    assert!(body["data"]["token"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_login_look_the_same() {
    let server = common::make_server();
    common::register(&server, "dave").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "login": "dave", "password": "wrong999" }))
        .await;
    let unknown_login = server
        .post("/api/auth/login")
        .json(&json!({ "login": "nobody", "password": "secret123" }))
        .await;

    wrong_password.assert_status_unauthorized();
    unknown_login.assert_status_unauthorized();
    assert_eq!(
        wrong_password.json::<Value>(),
        unknown_login.json::<Value>()
    );
}

#[tokio::test]
async fn test_me_returns_caller() {
    let server = common::make_server();
    let token = common::register(&server, "erin").await;

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["login"], "erin");
}

#[tokio::test]
async fn test_me_without_header() {
    let server = common::make_server();

    let response = server.get("/api/auth/me").await;

    response.assert_status_unauthorized();

    let body = response.json::<Value>();
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "Authorization header required");
}

#[tokio::test]
async fn test_me_with_non_bearer_scheme() {
    let server = common::make_server();

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", "Basic dXNlcjpwYXNz")
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<Value>()["message"],
        "Bearer token required"
    );
}

#[tokio::test]
async fn test_me_with_invalid_token() {
    let server = common::make_server();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("not.a.jwt")
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.json::<Value>()["message"], "Invalid token");
}
