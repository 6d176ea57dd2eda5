//! Common test utilities for integration tests.
//!
//! Builds the full router backed by a file document store in a temp
//! directory, so the suites run without any external service.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

use storage::{Documents, FileStore};
use ticket_panel_api::{app::create_app, config};

/// Admin credentials used by the test configuration.
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "test-admin-password";

/// A router plus the backing documents, for direct storage assertions.
pub struct TestApp {
    pub app: Router,
    pub docs: Documents,
    _dir: tempfile::TempDir,
}

pub fn test_config(data_dir: &std::path::Path) -> config::Config {
    config::Config {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 30,
        },
        storage: config::StorageConfig {
            backend: "file".to_string(),
            data_dir: data_dir.display().to_string(),
            database_url: "sqlite::memory:".to_string(),
        },
        logging: config::LoggingConfig {
            level: "error".to_string(),
            format: "pretty".to_string(),
        },
        security: config::SecurityConfig {
            cors_origins: vec![],
        },
        auth: config::AuthConfig {
            token_secret: "integration-test-secret".to_string(),
            token_expiry_secs: 604_800,
            admin_username: TEST_ADMIN_USERNAME.to_string(),
            admin_password: TEST_ADMIN_PASSWORD.to_string(),
        },
    }
}

/// Create a test application over a fresh temp directory.
pub fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(dir.path());
    let docs = Documents::new(Arc::new(FileStore::new(dir.path())));

    TestApp {
        app: create_app(config, docs.clone()),
        docs,
        _dir: dir,
    }
}

/// Build a JSON request, optionally with a bearer token.
pub fn json_request(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a GET request, optionally with a bearer token.
pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Build a request authenticated with a bot API key.
pub fn api_key_request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    api_key: &str,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-api-key", api_key)
        .header(header::CONTENT_TYPE, "application/json");
    match body {
        Some(body) => builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Parse a JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

/// Dispatch a request and return (status, body).
pub async fn send(
    app: &Router,
    request: Request<Body>,
) -> (axum::http::StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    (status, body)
}

/// Log in as the configured admin, returning a session token.
pub async fn admin_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/sessions/admin",
            serde_json::json!({
                "username": TEST_ADMIN_USERNAME,
                "password": TEST_ADMIN_PASSWORD
            }),
            None,
        ),
    )
    .await;
    assert!(status.is_success(), "Admin login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

/// Create a user via the admin API, returning its id.
pub async fn create_user(app: &Router, token: &str, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/users",
            serde_json::json!({"username": username, "password": password}),
            Some(token),
        ),
    )
    .await;
    assert_eq!(status, 201, "User creation failed: {}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Log a user in, returning a session token.
pub async fn user_token(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/sessions/user",
            serde_json::json!({"username": username, "password": password}),
            None,
        ),
    )
    .await;
    assert!(status.is_success(), "User login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

/// Create a bot credential via the admin API, returning (id, apiKey).
pub async fn create_bot(app: &Router, token: &str, name: &str) -> (String, String) {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/bot-credentials",
            serde_json::json!({"name": name}),
            Some(token),
        ),
    )
    .await;
    assert_eq!(status, 201, "Bot creation failed: {}", body);
    (
        body["id"].as_str().unwrap().to_string(),
        body["apiKey"].as_str().unwrap().to_string(),
    )
}

/// Assign a bot's owning user via the admin API.
pub async fn assign_owner(app: &Router, token: &str, bot_id: &str, user_id: &str) {
    let (status, body) = send(
        app,
        json_request(
            Method::PUT,
            &format!("/api/v1/bot-credentials/{}/owner", bot_id),
            serde_json::json!({"ownerUserId": user_id}),
            Some(token),
        ),
    )
    .await;
    assert!(status.is_success(), "Owner assignment failed: {}", body);
}

/// Claim a guild for a bot with the given session token.
pub async fn claim_guild(app: &Router, token: &str, bot_id: &str, guild_id: &str) {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/me/guilds/claim",
            serde_json::json!({"botId": bot_id, "guildId": guild_id}),
            Some(token),
        ),
    )
    .await;
    assert!(status.is_success(), "Guild claim failed: {}", body);
}
