//! Login routes issuing session tokens.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use shared::password::verify_password;
use shared::token::ADMIN_SUBJECT;

/// Request body for both login flows.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub subject_id: String,
    pub username: String,
    pub is_admin: bool,
    pub expires_in: i64,
}

/// Admin login against the configured credential pair.
///
/// POST /api/v1/sessions/admin
///
/// The configured pair is compared directly; this is the single bootstrap
/// identity from configuration, not a stored user record.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    request.validate()?;

    let auth = &state.config.auth;
    let configured = !auth.admin_password.is_empty();
    if !configured
        || request.username != auth.admin_username
        || request.password != auth.admin_password
    {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state
        .session_keys
        .issue(ADMIN_SUBJECT, &auth.admin_username, true)
        .map_err(|e| ApiError::Internal(format!("Token error: {}", e)))?;

    Ok(Json(SessionResponse {
        token,
        subject_id: ADMIN_SUBJECT.to_string(),
        username: auth.admin_username.clone(),
        is_admin: true,
        expires_in: auth.token_expiry_secs,
    }))
}

/// User login with a hashed-password check.
///
/// POST /api/v1/sessions/user
pub async fn user_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    request.validate()?;

    // A missing user and a wrong password are indistinguishable to the
    // caller.
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .docs
        .find_user_by_username(&request.username)
        .await?
        .ok_or_else(invalid)?;

    let matches = verify_password(&request.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password error: {}", e)))?;
    if !matches {
        return Err(invalid());
    }

    let token = state
        .session_keys
        .issue(&user.id.to_string(), &user.username, user.is_admin)
        .map_err(|e| ApiError::Internal(format!("Token error: {}", e)))?;

    Ok(Json(SessionResponse {
        token,
        subject_id: user.id.to_string(),
        username: user.username,
        is_admin: user.is_admin,
        expires_in: state.config.auth.token_expiry_secs,
    }))
}
