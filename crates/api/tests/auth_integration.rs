//! Authentication and authorization gate tests.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_admin_login_with_configured_pair() {
    let test_app = spawn_app();
    let (status, body) = send(
        &test_app.app,
        json_request(
            Method::POST,
            "/api/v1/sessions/admin",
            json!({"username": TEST_ADMIN_USERNAME, "password": TEST_ADMIN_PASSWORD}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subjectId"], "admin");
    assert_eq!(body["isAdmin"], true);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_login_rejects_wrong_password() {
    let test_app = spawn_app();
    let (status, body) = send(
        &test_app.app,
        json_request(
            Method::POST,
            "/api/v1/sessions/admin",
            json!({"username": TEST_ADMIN_USERNAME, "password": "wrong"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_user_login_round_trip() {
    let test_app = spawn_app();
    let admin = admin_token(&test_app.app).await;
    let user_id = create_user(&test_app.app, &admin, "bob", "pw1").await;

    let (status, body) = send(
        &test_app.app,
        json_request(
            Method::POST,
            "/api/v1/sessions/user",
            json!({"username": "bob", "password": "pw1"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subjectId"], user_id);
    assert_eq!(body["isAdmin"], false);
}

#[tokio::test]
async fn test_user_login_rejects_wrong_password() {
    let test_app = spawn_app();
    let admin = admin_token(&test_app.app).await;
    create_user(&test_app.app, &admin, "bob", "pw1").await;

    let (status, _) = send(
        &test_app.app,
        json_request(
            Method::POST,
            "/api/v1/sessions/user",
            json!({"username": "bob", "password": "pw2"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_user_login_indistinguishable_from_bad_password() {
    let test_app = spawn_app();
    let (status, body) = send(
        &test_app.app,
        json_request(
            Method::POST,
            "/api/v1/sessions/user",
            json!({"username": "ghost", "password": "pw"}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let test_app = spawn_app();
    let (status, _) = send(&test_app.app, get_request("/api/v1/users", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let test_app = spawn_app();
    let (status, _) = send(
        &test_app.app,
        get_request("/api/v1/users", Some("not-a-real-token")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_token_forbidden_on_admin_routes() {
    let test_app = spawn_app();
    let admin = admin_token(&test_app.app).await;
    create_user(&test_app.app, &admin, "bob", "pw1").await;
    let bob = user_token(&test_app.app, "bob", "pw1").await;

    let (status, body) = send(&test_app.app, get_request("/api/v1/users", Some(&bob))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _) = send(
        &test_app.app,
        get_request("/api/v1/admin/export", Some(&bob)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_seeded_admin_user_can_log_in() {
    // The startup seed creates a real User record for the configured
    // username; it authenticates through the hashed user-login path.
    let test_app = spawn_app();
    let config = test_config(std::path::Path::new("unused"));
    ticket_panel_api::services::seed::seed_admin_user(&test_app.docs, &config.auth)
        .await
        .unwrap();

    let (status, body) = send(
        &test_app.app,
        json_request(
            Method::POST,
            "/api/v1/sessions/user",
            json!({"username": TEST_ADMIN_USERNAME, "password": TEST_ADMIN_PASSWORD}),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAdmin"], true);
    // The seeded record carries its own id, not the fixed admin subject.
    assert_ne!(body["subjectId"], "admin");
}

#[tokio::test]
async fn test_seed_is_idempotent_across_runs() {
    let test_app = spawn_app();
    let config = test_config(std::path::Path::new("unused"));

    ticket_panel_api::services::seed::seed_admin_user(&test_app.docs, &config.auth)
        .await
        .unwrap();
    ticket_panel_api::services::seed::seed_admin_user(&test_app.docs, &config.auth)
        .await
        .unwrap();

    let users = test_app.docs.users().await.unwrap();
    let admins: Vec<_> = users
        .iter()
        .filter(|u| u.username == TEST_ADMIN_USERNAME)
        .collect();
    assert_eq!(admins.len(), 1);
}

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let test_app = spawn_app();

    let (status, body) = send(&test_app.app, get_request("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["connected"], true);

    let (status, _) = send(&test_app.app, get_request("/api/health/live", None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&test_app.app, get_request("/api/health/ready", None)).await;
    assert_eq!(status, StatusCode::OK);
}
