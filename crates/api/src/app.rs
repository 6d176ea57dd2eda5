use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, request_id, security_headers_middleware};
use crate::routes::{admin, bot_credentials, bots, guilds, health, me, sessions, users};
use shared::token::SessionKeys;
use storage::{Documents, PublishBoard};

#[derive(Clone)]
pub struct AppState {
    pub docs: Documents,
    pub publish: PublishBoard,
    pub session_keys: Arc<SessionKeys>,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, docs: Documents) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        publish: PublishBoard::new(docs.clone()),
        session_keys: Arc::new(SessionKeys::new(
            &config.auth.token_secret,
            config.auth.token_expiry_secs,
        )),
        docs,
        config: config.clone(),
    };

    // CORS: any origin in development, the configured list otherwise.
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Login flows (no authentication).
    let session_routes = Router::new()
        .route("/api/v1/sessions/admin", post(sessions::admin_login))
        .route("/api/v1/sessions/user", post(sessions::user_login));

    // Admin-only resource management (AdminSession extractor).
    let admin_routes = Router::new()
        .route("/api/v1/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/v1/users/:user_id",
            put(users::update_user).delete(users::delete_user),
        )
        .route(
            "/api/v1/bot-credentials",
            get(bot_credentials::list_bots).post(bot_credentials::create_bot),
        )
        .route(
            "/api/v1/bot-credentials/:bot_id/owner",
            put(bot_credentials::assign_owner),
        )
        .route(
            "/api/v1/bot-credentials/:bot_id/secret",
            put(bot_credentials::rotate_secret),
        )
        .route(
            "/api/v1/bot-credentials/:bot_id",
            delete(bot_credentials::delete_bot),
        )
        .route("/api/v1/admin/export", get(admin::export_documents))
        .route("/api/v1/admin/import", post(admin::import_documents));

    // Session-scoped caller views (SessionAuth extractor).
    let me_routes = Router::new()
        .route("/api/v1/me/bot-credentials", get(me::my_bot_credentials))
        .route("/api/v1/me/guilds", get(me::my_guilds))
        .route("/api/v1/me/guilds/claim", post(me::claim_guild));

    // Guild resources. GETs (and the config PUT / publish POST) are panel
    // endpoints guarded by the ownership chain; the roster POSTs and the
    // publish GET are bot endpoints guarded by API key. The config GET
    // accepts either principal.
    let guild_routes = Router::new()
        .route(
            "/api/v1/guilds/:guild_id/config",
            get(guilds::get_config).put(guilds::put_config),
        )
        .route(
            "/api/v1/guilds/:guild_id/roles",
            get(guilds::get_roles).post(guilds::sync_roles),
        )
        .route(
            "/api/v1/guilds/:guild_id/channels",
            get(guilds::get_channels).post(guilds::sync_channels),
        )
        .route(
            "/api/v1/guilds/:guild_id/publish",
            post(guilds::request_publish).get(guilds::poll_publish),
        );

    // Bot self-registration (BotKeyAuth extractor).
    let bot_routes = Router::new().route("/api/v1/bots/register", post(bots::register_guild));

    // Public routes (no authentication required).
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .merge(me_routes)
        .merge(guild_routes)
        .merge(bot_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id))
        .layer(cors)
        .with_state(state)
}
