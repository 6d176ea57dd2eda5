//! The guild ownership chain.
//!
//! Panel access to a guild is derived fresh on every request from the
//! guild → bot → owning user relation. Nothing here is cached: ownership
//! can change between requests.

use crate::error::ApiError;
use crate::extractors::SessionAuth;
use domain::models::{BotCredential, GuildBinding};
use storage::Documents;

/// Resolves the ownership chain for a guild and checks the caller against
/// it.
///
/// Lookup failures are NotFound (missing binding, then missing bot);
/// a resolved chain the caller does not own is Forbidden unless the
/// session is an admin's. Returns the resolved records for handlers that
/// need them.
pub async fn require_guild_access(
    docs: &Documents,
    session: &SessionAuth,
    guild_id: &str,
) -> Result<(GuildBinding, BotCredential), ApiError> {
    let binding = docs
        .find_binding(guild_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Guild not found".to_string()))?;

    let bot = docs
        .find_bot(binding.bot_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Bot not found".to_string()))?;

    if session.is_admin {
        return Ok((binding, bot));
    }

    let owns = bot
        .owner_user_id
        .map(|owner| owner.to_string() == session.subject_id)
        .unwrap_or(false);

    if owns {
        Ok((binding, bot))
    } else {
        Err(ApiError::Forbidden(
            "Not the owner of this guild's bot".to_string(),
        ))
    }
}
