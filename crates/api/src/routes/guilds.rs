//! Per-guild resources: configuration, roster snapshots, and the publish
//! flag.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::bot_key::API_KEY_HEADER;
use crate::extractors::{BotKeyAuth, SessionAuth};
use crate::services::authorize::require_guild_access;
use domain::models::{ChannelEntry, GuildConfig, PublishStatus, RoleEntry};

/// Query string for the bot's publish poll: `?consume=1` takes the flag,
/// anything else peeks.
#[derive(Debug, Deserialize)]
pub struct PublishQuery {
    #[serde(default)]
    pub consume: u8,
}

/// Effective configuration for a guild: the stored tree, or the fixed
/// default when none was saved yet. The default is never persisted here.
///
/// GET /api/v1/guilds/:guild_id/config
///
/// Accepts either principal: a bot key, or a session subject to the
/// ownership chain.
pub async fn get_config(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<GuildConfig>, ApiError> {
    if let Some(api_key) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        BotKeyAuth::validate(&state.docs, api_key).await?;
    } else {
        let session = SessionAuth::from_headers(&headers, &state.session_keys)?;
        require_guild_access(&state.docs, &session, &guild_id).await?;
    }

    let config = state.docs.guild_config(&guild_id).await?.unwrap_or_default();
    Ok(Json(config))
}

/// Replace a guild's configuration wholesale.
///
/// PUT /api/v1/guilds/:guild_id/config
pub async fn put_config(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    session: SessionAuth,
    Json(config): Json<GuildConfig>,
) -> Result<Json<GuildConfig>, ApiError> {
    require_guild_access(&state.docs, &session, &guild_id).await?;

    state.docs.replace_guild_config(&guild_id, &config).await?;
    Ok(Json(config))
}

/// Read a guild's role snapshot (panel view).
///
/// GET /api/v1/guilds/:guild_id/roles
pub async fn get_roles(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    session: SessionAuth,
) -> Result<Json<Vec<RoleEntry>>, ApiError> {
    require_guild_access(&state.docs, &session, &guild_id).await?;
    Ok(Json(state.docs.guild_roles(&guild_id).await?))
}

/// Read a guild's channel snapshot (panel view).
///
/// GET /api/v1/guilds/:guild_id/channels
pub async fn get_channels(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    session: SessionAuth,
) -> Result<Json<Vec<ChannelEntry>>, ApiError> {
    require_guild_access(&state.docs, &session, &guild_id).await?;
    Ok(Json(state.docs.guild_channels(&guild_id).await?))
}

/// Replace a guild's role snapshot (bot sync push).
///
/// POST /api/v1/guilds/:guild_id/roles
pub async fn sync_roles(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    _auth: BotKeyAuth,
    Json(roles): Json<Vec<RoleEntry>>,
) -> Result<Json<Vec<RoleEntry>>, ApiError> {
    state.docs.replace_guild_roles(&guild_id, roles.clone()).await?;
    Ok(Json(roles))
}

/// Replace a guild's channel snapshot (bot sync push).
///
/// POST /api/v1/guilds/:guild_id/channels
pub async fn sync_channels(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    _auth: BotKeyAuth,
    Json(channels): Json<Vec<ChannelEntry>>,
) -> Result<Json<Vec<ChannelEntry>>, ApiError> {
    state
        .docs
        .replace_guild_channels(&guild_id, channels.clone())
        .await?;
    Ok(Json(channels))
}

/// Raise the publish flag for a guild (panel side).
///
/// POST /api/v1/guilds/:guild_id/publish
///
/// A repeat request before the bot polls overwrites the pending flag.
pub async fn request_publish(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    session: SessionAuth,
) -> Result<Json<PublishStatus>, ApiError> {
    require_guild_access(&state.docs, &session, &guild_id).await?;

    let flag = state
        .publish
        .request(&guild_id, Some(session.username.clone()))
        .await?;

    info!(guild_id = %guild_id, by_user = %session.username, "Publish requested");
    Ok(Json(PublishStatus::pending(flag)))
}

/// Poll the publish flag (bot side): peek by default, consume with
/// `?consume=1`.
///
/// GET /api/v1/guilds/:guild_id/publish?consume=0|1
pub async fn poll_publish(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    _auth: BotKeyAuth,
    Query(query): Query<PublishQuery>,
) -> Result<Json<PublishStatus>, ApiError> {
    let status = if query.consume == 1 {
        state.publish.consume(&guild_id).await?
    } else {
        state.publish.peek(&guild_id).await?
    };

    Ok(Json(status))
}
