//! End-to-end scenario: provisioning, claim, registration, publish.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_full_panel_and_bot_lifecycle() {
    let test_app = spawn_app();

    // Admin creates user "bob" and bot "Helper", and hands the bot to bob.
    let admin = admin_token(&test_app.app).await;
    let bob_id = create_user(&test_app.app, &admin, "bob", "pw1").await;
    let (bot_id, api_key) = create_bot(&test_app.app, &admin, "Helper").await;
    assign_owner(&test_app.app, &admin, &bot_id, &bob_id).await;

    // Bob logs in and claims guild g1 for his bot.
    let bob = user_token(&test_app.app, "bob", "pw1").await;
    let (status, body) = send(
        &test_app.app,
        json_request(
            Method::POST,
            "/api/v1/me/guilds/claim",
            json!({"botId": bot_id, "guildId": "g1"}),
            Some(&bob),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guildId"], "g1");

    // The bot process registers itself for the same guild with its key.
    let (status, _) = send(
        &test_app.app,
        api_key_request(
            Method::POST,
            "/api/v1/bots/register",
            Some(json!({"guildId": "g1", "name": "Bob's Server"})),
            &api_key,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Bob's view lists his bot and his guild.
    let (_, body) = send(
        &test_app.app,
        get_request("/api/v1/me/bot-credentials", Some(&bob)),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Helper");

    let (_, body) = send(&test_app.app, get_request("/api/v1/me/guilds", Some(&bob))).await;
    assert_eq!(body[0]["guildId"], "g1");
    assert_eq!(body[0]["name"], "Bob's Server");

    // Bob saves a config and requests a publish.
    let mut config = serde_json::to_value(domain::models::GuildConfig::default()).unwrap();
    config["brand"]["name"] = json!("Bob's Tickets");
    let (status, _) = send(
        &test_app.app,
        json_request(Method::PUT, "/api/v1/guilds/g1/config", config, Some(&bob)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &test_app.app,
        json_request(Method::POST, "/api/v1/guilds/g1/publish", json!({}), Some(&bob)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The bot polls: sees the pending flag raised by bob, reads the fresh
    // config, and the flag is gone afterwards.
    let (status, body) = send(
        &test_app.app,
        api_key_request(
            Method::GET,
            "/api/v1/guilds/g1/publish?consume=1",
            None,
            &api_key,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pending"], true);
    assert_eq!(body["info"]["byUser"], "bob");

    let (_, body) = send(
        &test_app.app,
        api_key_request(Method::GET, "/api/v1/guilds/g1/config", None, &api_key),
    )
    .await;
    assert_eq!(body["brand"]["name"], "Bob's Tickets");

    let (_, body) = send(
        &test_app.app,
        api_key_request(
            Method::GET,
            "/api/v1/guilds/g1/publish?consume=1",
            None,
            &api_key,
        ),
    )
    .await;
    assert_eq!(body["pending"], false);
}
