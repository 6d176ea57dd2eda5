//! Admin-managed user CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminSession;
use domain::models::{User, UserView};
use serde::Deserialize;
use shared::password::hash_password;

/// Request body for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub is_admin: bool,
}

/// Request body for updating a user. Omitted fields keep their values.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,

    pub is_admin: Option<bool>,
}

/// List all users.
///
/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = state.docs.users().await?;
    Ok(Json(users.iter().map(UserView::from).collect()))
}

/// Create a user.
///
/// POST /api/v1/users
///
/// Username uniqueness is enforced here, at creation time only.
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    request.validate()?;

    let mut users = state.docs.users().await?;
    if users.iter().any(|u| u.username == request.username) {
        return Err(ApiError::Conflict("Username already taken".to_string()));
    }

    let user = User {
        id: Uuid::new_v4(),
        username: request.username,
        password_hash: hash_password(&request.password)
            .map_err(|e| ApiError::Internal(format!("Password error: {}", e)))?,
        is_admin: request.is_admin,
    };

    let view = UserView::from(&user);
    users.push(user);
    state.docs.save_users(&users).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Update a user's username, password, or admin flag.
///
/// PUT /api/v1/users/:user_id
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    request.validate()?;

    let mut users = state.docs.users().await?;
    let user = users
        .iter_mut()
        .find(|u| u.id == user_id)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if let Some(username) = request.username {
        user.username = username;
    }
    if let Some(password) = request.password {
        user.password_hash = hash_password(&password)
            .map_err(|e| ApiError::Internal(format!("Password error: {}", e)))?;
    }
    if let Some(is_admin) = request.is_admin {
        user.is_admin = is_admin;
    }

    let view = UserView::from(&*user);
    state.docs.save_users(&users).await?;

    Ok(Json(view))
}

/// Delete a user.
///
/// DELETE /api/v1/users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut users = state.docs.users().await?;
    let before = users.len();
    users.retain(|u| u.id != user_id);

    if users.len() == before {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    state.docs.save_users(&users).await?;
    Ok(StatusCode::NO_CONTENT)
}
