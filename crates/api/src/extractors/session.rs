//! Session token extractors.
//!
//! Validates the `Authorization: Bearer` token and exposes the
//! authenticated principal to handlers. [`AdminSession`] additionally
//! requires the admin flag.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::app::AppState;
use crate::error::ApiError;
use shared::token::{SessionClaims, SessionKeys};

/// Authenticated session principal.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    /// Subject id: a user id, or `"admin"` for the configured admin login.
    pub subject_id: String,
    /// Username at token issue time.
    pub username: String,
    /// Whether the principal has admin privileges.
    pub is_admin: bool,
}

impl From<SessionClaims> for SessionAuth {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject_id: claims.sub,
            username: claims.username,
            is_admin: claims.admin,
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

impl SessionAuth {
    /// Validates the bearer token from a header map. Used by the extractor
    /// and by handlers that accept either credential kind.
    pub fn from_headers(headers: &HeaderMap, keys: &SessionKeys) -> Result<Self, ApiError> {
        let token = bearer_token(headers)?;
        let claims = keys
            .validate(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;
        Ok(claims.into())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        SessionAuth::from_headers(&parts.headers, &state.session_keys)
    }
}

/// Session principal with the admin flag required.
///
/// Rejects with Forbidden when the token is valid but not an admin's.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionAuth);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = SessionAuth::from_request_parts(parts, state).await?;
        if !auth.is_admin {
            return Err(ApiError::Forbidden("Admin privileges required".to_string()));
        }
        Ok(AdminSession(auth))
    }
}
