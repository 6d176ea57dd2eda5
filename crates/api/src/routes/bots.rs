//! Bot self-registration.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::BotKeyAuth;
use domain::models::GuildBinding;

/// Request body for guild registration by the bot process.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterGuildRequest {
    #[validate(length(min = 1, message = "Guild id is required"))]
    pub guild_id: String,

    pub name: Option<String>,
    pub icon: Option<String>,
}

/// Upsert the binding for a guild the calling bot serves.
///
/// POST /api/v1/bots/register
///
/// Authorized by key possession alone: the key is trusted for any guild it
/// names in the payload. The binding is keyed by guild id; omitted
/// name/icon are preserved and lastSeen is refreshed.
pub async fn register_guild(
    State(state): State<AppState>,
    auth: BotKeyAuth,
    Json(request): Json<RegisterGuildRequest>,
) -> Result<Json<GuildBinding>, ApiError> {
    request.validate()?;

    let binding = state
        .docs
        .upsert_binding(
            &request.guild_id,
            auth.credential.id,
            request.name,
            request.icon,
        )
        .await?;

    info!(
        guild_id = %binding.guild_id,
        bot_id = %auth.credential.id,
        "Guild registered by bot"
    );

    Ok(Json(binding))
}
