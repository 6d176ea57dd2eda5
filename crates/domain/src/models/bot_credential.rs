//! Bot credentials: the backend's record for an external bot process.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered bot as persisted in the `bot-credentials` document.
///
/// `api_key` authenticates the bot process against this backend and is
/// visible to admins. `token` is the bot's Discord secret: stored when
/// supplied, never serialized into any response ([`BotCredentialView`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotCredential {
    pub id: Uuid,
    pub name: String,
    pub api_key: String,
    pub owner_user_id: Option<Uuid>,
    pub discord_app_id: Option<String>,
    pub token: Option<String>,
}

/// Safe view of a credential: the stored record minus `token`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotCredentialView {
    pub id: Uuid,
    pub name: String,
    pub api_key: String,
    pub owner_user_id: Option<Uuid>,
    pub discord_app_id: Option<String>,
    /// Whether a Discord token is on file, without revealing it.
    pub has_token: bool,
}

impl From<&BotCredential> for BotCredentialView {
    fn from(bot: &BotCredential) -> Self {
        Self {
            id: bot.id,
            name: bot.name.clone(),
            api_key: bot.api_key.clone(),
            owner_user_id: bot.owner_user_id,
            discord_app_id: bot.discord_app_id.clone(),
            has_token: bot.token.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BotCredential {
        BotCredential {
            id: Uuid::new_v4(),
            name: "Helper".to_string(),
            api_key: "bk_0123456789abcdef0123456789abcdef".to_string(),
            owner_user_id: None,
            discord_app_id: Some("112233445566778899".to_string()),
            token: Some("discord-secret-token".to_string()),
        }
    }

    #[test]
    fn test_view_never_contains_token() {
        let bot = sample();
        let json = serde_json::to_string(&BotCredentialView::from(&bot)).unwrap();
        assert!(!json.contains("discord-secret-token"));
        assert!(!json.contains("\"token\""));
        assert!(json.contains("\"hasToken\":true"));
    }

    #[test]
    fn test_view_keeps_api_key() {
        let bot = sample();
        let view = BotCredentialView::from(&bot);
        assert_eq!(view.api_key, bot.api_key);
    }

    #[test]
    fn test_stored_record_round_trips_token() {
        let bot = sample();
        let json = serde_json::to_string(&bot).unwrap();
        let back: BotCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(back.token.as_deref(), Some("discord-secret-token"));
    }
}
