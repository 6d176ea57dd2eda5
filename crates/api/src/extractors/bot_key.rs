//! Bot API key extractor.
//!
//! Matches the `x-api-key` header exactly against the stored key of a
//! registered bot credential. Possession of a valid key is the whole
//! authorization for bot endpoints; no per-guild scoping is applied.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::BotCredential;
use storage::Documents;

/// Header carrying the bot API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The bot credential matched by the presented API key.
#[derive(Debug, Clone)]
pub struct BotKeyAuth {
    pub credential: BotCredential,
}

impl BotKeyAuth {
    /// Looks up the presented key. Lookup errors are masked as an
    /// authentication failure only when the key simply does not match;
    /// storage failures surface as Internal.
    pub async fn validate(docs: &Documents, api_key: &str) -> Result<Self, ApiError> {
        let credential = docs
            .find_bot_by_api_key(api_key)
            .await
            .map_err(|e| {
                tracing::error!("Bot credential lookup failed: {}", e);
                ApiError::Internal("Authentication service unavailable".to_string())
            })?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        Ok(BotKeyAuth { credential })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for BotKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Invalid or missing API key".to_string()))?;

        Self::validate(&state.docs, api_key).await
    }
}
