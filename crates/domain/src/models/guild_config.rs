//! Per-guild panel configuration.
//!
//! The whole tree is replaced on save. Reads for a guild with no stored
//! configuration fall back to [`GuildConfig::default`], which is generated
//! on the fly and never persisted implicitly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Branding shown at the top of the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub name: String,
    pub icon: Option<String>,
}

/// Panel theme colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub bg: String,
    pub accent: String,
    pub text: String,
}

/// Panel appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub banner_url: Option<String>,
    pub theme: Theme,
    pub title: String,
    pub layout: String,
}

/// Discord channel bindings used by the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channels {
    pub panel_channel_id: Option<String>,
    pub log_channel_id: Option<String>,
    pub ratings_channel_id: Option<String>,
}

/// One ticket button on the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketButton {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub label: String,
    pub emoji: String,
    pub order: i64,
    pub visible: bool,
}

/// One field of a ticket intake form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub max_len: i64,
}

/// Intake form attached to a ticket button.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub title: String,
    pub fields: Vec<FormField>,
}

/// Role mappings and per-command permission levels.
///
/// Command levels: 1 = staff, 2 = high staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub staff_role_id: Option<String>,
    pub high_staff_role_id: Option<String>,
    pub buycraft_role_id: Option<String>,
    pub commands: BTreeMap<String, u8>,
}

/// Miscellaneous panel fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Misc {
    pub tienda_url: Option<String>,
    pub server_ip: Option<String>,
}

/// The full per-guild configuration tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildConfig {
    pub brand: Brand,
    pub panel: Panel,
    pub channels: Channels,
    pub buttons: Vec<TicketButton>,
    pub forms: BTreeMap<String, Form>,
    pub permissions: Permissions,
    pub misc: Misc,
}

impl Default for GuildConfig {
    fn default() -> Self {
        let mut forms = BTreeMap::new();
        forms.insert(
            "support".to_string(),
            Form {
                title: "Support request".to_string(),
                fields: vec![FormField {
                    field_type: "short".to_string(),
                    id: "subject".to_string(),
                    label: "Subject".to_string(),
                    placeholder: "What do you need help with?".to_string(),
                    required: true,
                    max_len: 100,
                }],
            },
        );

        let mut commands = BTreeMap::new();
        commands.insert("close".to_string(), 1);
        commands.insert("add".to_string(), 1);
        commands.insert("rename".to_string(), 2);
        commands.insert("transcript".to_string(), 2);

        Self {
            brand: Brand {
                name: "Tickets".to_string(),
                icon: None,
            },
            panel: Panel {
                banner_url: None,
                theme: Theme {
                    bg: "#1e1f22".to_string(),
                    accent: "#5865f2".to_string(),
                    text: "#ffffff".to_string(),
                },
                title: "Open a ticket".to_string(),
                layout: "buttons".to_string(),
            },
            channels: Channels {
                panel_channel_id: None,
                log_channel_id: None,
                ratings_channel_id: None,
            },
            buttons: vec![TicketButton {
                id: "support".to_string(),
                title: "Support".to_string(),
                subtitle: "Questions and issues".to_string(),
                label: "Open ticket".to_string(),
                emoji: "🎫".to_string(),
                order: 0,
                visible: true,
            }],
            forms,
            permissions: Permissions {
                staff_role_id: None,
                high_staff_role_id: None,
                buycraft_role_id: None,
                commands,
            },
            misc: Misc {
                tienda_url: None,
                server_ip: None,
            },
        }
    }
}
