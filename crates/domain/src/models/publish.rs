//! Publish flag: the single-slot panel-to-bot handshake.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending publish request for one guild.
///
/// At most one exists per guild; a second request before the bot polls
/// overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishFlag {
    pub requested_at: DateTime<Utc>,
    pub by_user: Option<String>,
}

/// Wire shape returned by peek and consume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishStatus {
    pub pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<PublishFlag>,
}

impl PublishStatus {
    pub fn empty() -> Self {
        Self {
            pending: false,
            info: None,
        }
    }

    pub fn pending(flag: PublishFlag) -> Self {
        Self {
            pending: true,
            info: Some(flag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_status_omits_info() {
        let json = serde_json::to_string(&PublishStatus::empty()).unwrap();
        assert_eq!(json, r#"{"pending":false}"#);
    }

    #[test]
    fn test_pending_status_carries_flag() {
        let status = PublishStatus::pending(PublishFlag {
            requested_at: Utc::now(),
            by_user: Some("alice".to_string()),
        });
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["pending"], true);
        assert_eq!(value["info"]["byUser"], "alice");
        assert!(value["info"]["requestedAt"].is_string());
    }

    #[test]
    fn test_flag_null_user_round_trips() {
        let flag = PublishFlag {
            requested_at: Utc::now(),
            by_user: None,
        };
        let json = serde_json::to_string(&flag).unwrap();
        assert!(json.contains("\"byUser\":null"));
        let back: PublishFlag = serde_json::from_str(&json).unwrap();
        assert!(back.by_user.is_none());
    }
}
