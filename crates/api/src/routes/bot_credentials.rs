//! Admin management of bot credentials.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminSession;
use domain::models::{BotCredential, BotCredentialView};
use shared::crypto::{generate_api_key, key_prefix};

/// Request body for creating a credential. Any caller-supplied id is
/// ignored; the API key is always minted server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBotRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub discord_app_id: Option<String>,

    /// The bot's Discord secret. Stored if supplied, never echoed back.
    pub token: Option<String>,
}

/// Request body for assigning (or clearing) the owning user.
///
/// The user id is not checked for existence: references are soft, and a
/// dangling owner simply never matches an authenticated subject.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignOwnerRequest {
    pub owner_user_id: Option<Uuid>,
}

/// Request body for rotating the external secret / app id. Omitted fields
/// keep their values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotateSecretRequest {
    pub token: Option<String>,
    pub discord_app_id: Option<String>,
}

/// List all bot credentials (safe views).
///
/// GET /api/v1/bot-credentials
pub async fn list_bots(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<BotCredentialView>>, ApiError> {
    let bots = state.docs.bot_credentials().await?;
    Ok(Json(bots.iter().map(BotCredentialView::from).collect()))
}

/// Create a bot credential with a freshly minted API key.
///
/// POST /api/v1/bot-credentials
pub async fn create_bot(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(request): Json<CreateBotRequest>,
) -> Result<(StatusCode, Json<BotCredentialView>), ApiError> {
    request.validate()?;

    let bot = BotCredential {
        id: Uuid::new_v4(),
        name: request.name,
        api_key: generate_api_key(),
        owner_user_id: None,
        discord_app_id: request.discord_app_id,
        token: request.token,
    };

    info!(
        bot_id = %bot.id,
        key_prefix = key_prefix(&bot.api_key).unwrap_or("?"),
        "Created bot credential"
    );

    let view = BotCredentialView::from(&bot);
    let mut bots = state.docs.bot_credentials().await?;
    bots.push(bot);
    state.docs.save_bot_credentials(&bots).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Assign the owning user of a credential.
///
/// PUT /api/v1/bot-credentials/:bot_id/owner
pub async fn assign_owner(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(bot_id): Path<Uuid>,
    Json(request): Json<AssignOwnerRequest>,
) -> Result<Json<BotCredentialView>, ApiError> {
    let mut bots = state.docs.bot_credentials().await?;
    let bot = bots
        .iter_mut()
        .find(|b| b.id == bot_id)
        .ok_or_else(|| ApiError::NotFound("Bot not found".to_string()))?;

    bot.owner_user_id = request.owner_user_id;

    let view = BotCredentialView::from(&*bot);
    state.docs.save_bot_credentials(&bots).await?;

    Ok(Json(view))
}

/// Rotate the stored Discord token and/or application id.
///
/// PUT /api/v1/bot-credentials/:bot_id/secret
pub async fn rotate_secret(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(bot_id): Path<Uuid>,
    Json(request): Json<RotateSecretRequest>,
) -> Result<Json<BotCredentialView>, ApiError> {
    let mut bots = state.docs.bot_credentials().await?;
    let bot = bots
        .iter_mut()
        .find(|b| b.id == bot_id)
        .ok_or_else(|| ApiError::NotFound("Bot not found".to_string()))?;

    if request.token.is_some() {
        bot.token = request.token;
    }
    if request.discord_app_id.is_some() {
        bot.discord_app_id = request.discord_app_id;
    }

    let view = BotCredentialView::from(&*bot);
    state.docs.save_bot_credentials(&bots).await?;

    Ok(Json(view))
}

/// Delete a bot credential.
///
/// DELETE /api/v1/bot-credentials/:bot_id
pub async fn delete_bot(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(bot_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut bots = state.docs.bot_credentials().await?;
    let before = bots.len();
    bots.retain(|b| b.id != bot_id);

    if bots.len() == before {
        return Err(ApiError::NotFound("Bot not found".to_string()));
    }

    state.docs.save_bot_credentials(&bots).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let ok = CreateBotRequest {
            name: "Helper".to_string(),
            discord_app_id: None,
            token: None,
        };
        assert!(ok.validate().is_ok());

        let unnamed = CreateBotRequest {
            name: String::new(),
            discord_app_id: None,
            token: None,
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_create_request_ignores_unknown_id_field() {
        // A caller-supplied id is simply not part of the request shape.
        let request: CreateBotRequest = serde_json::from_str(
            r#"{"id": "attacker-chosen", "name": "Helper", "apiKey": "bk_forged"}"#,
        )
        .unwrap();
        assert_eq!(request.name, "Helper");
    }

    #[test]
    fn test_assign_owner_accepts_null() {
        let request: AssignOwnerRequest =
            serde_json::from_str(r#"{"ownerUserId": null}"#).unwrap();
        assert!(request.owner_user_id.is_none());
    }

    #[test]
    fn test_rotate_request_partial() {
        let request: RotateSecretRequest =
            serde_json::from_str(r#"{"token": "new-secret"}"#).unwrap();
        assert_eq!(request.token.as_deref(), Some("new-secret"));
        assert!(request.discord_app_id.is_none());
    }
}
