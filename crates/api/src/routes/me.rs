//! Caller-scoped views and the guild claim flow.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionAuth;
use domain::models::{BotCredentialView, GuildBinding};

/// Request body for claiming a guild for one of the caller's bots.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClaimGuildRequest {
    pub bot_id: Uuid,

    #[validate(length(min = 1, message = "Guild id is required"))]
    pub guild_id: String,

    pub name: Option<String>,
    pub icon: Option<String>,
}

/// Bot credentials owned by the caller; admins see all.
///
/// GET /api/v1/me/bot-credentials
pub async fn my_bot_credentials(
    State(state): State<AppState>,
    session: SessionAuth,
) -> Result<Json<Vec<BotCredentialView>>, ApiError> {
    let bots = state.docs.bot_credentials().await?;

    let views = bots
        .iter()
        .filter(|b| {
            session.is_admin
                || b.owner_user_id
                    .map(|owner| owner.to_string() == session.subject_id)
                    .unwrap_or(false)
        })
        .map(BotCredentialView::from)
        .collect();

    Ok(Json(views))
}

/// Guild bindings whose bot the caller owns; admins see all.
///
/// GET /api/v1/me/guilds
pub async fn my_guilds(
    State(state): State<AppState>,
    session: SessionAuth,
) -> Result<Json<Vec<GuildBinding>>, ApiError> {
    let bindings = state.docs.guild_bindings().await?;
    if session.is_admin {
        return Ok(Json(bindings));
    }

    let bots = state.docs.bot_credentials().await?;
    let owned: Vec<Uuid> = bots
        .iter()
        .filter(|b| {
            b.owner_user_id
                .map(|owner| owner.to_string() == session.subject_id)
                .unwrap_or(false)
        })
        .map(|b| b.id)
        .collect();

    Ok(Json(
        bindings
            .into_iter()
            .filter(|binding| owned.contains(&binding.bot_id))
            .collect(),
    ))
}

/// Bind a guild to one of the caller's bots.
///
/// POST /api/v1/me/guilds/claim
///
/// The caller must own the named bot (admins may claim for any bot).
/// Upsert semantics: an existing binding is rebound and its lastSeen
/// refreshed; omitted name/icon are preserved.
pub async fn claim_guild(
    State(state): State<AppState>,
    session: SessionAuth,
    Json(request): Json<ClaimGuildRequest>,
) -> Result<Json<GuildBinding>, ApiError> {
    request.validate()?;

    let bot = state
        .docs
        .find_bot(request.bot_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Bot not found".to_string()))?;

    let owns = bot
        .owner_user_id
        .map(|owner| owner.to_string() == session.subject_id)
        .unwrap_or(false);
    if !session.is_admin && !owns {
        return Err(ApiError::Forbidden("Not the owner of this bot".to_string()));
    }

    let binding = state
        .docs
        .upsert_binding(&request.guild_id, bot.id, request.name, request.icon)
        .await?;

    info!(
        guild_id = %binding.guild_id,
        bot_id = %bot.id,
        claimed_by = %session.username,
        "Guild claimed"
    );

    Ok(Json(binding))
}
