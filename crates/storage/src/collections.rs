//! Typed access to the persisted documents.
//!
//! Each accessor is one `read` or one read-modify-write against a single
//! document. There is no cross-document transaction and no in-process
//! locking: concurrent mutations of the same document are last-write-wins
//! by contract.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use domain::models::{BotCredential, ChannelEntry, GuildBinding, GuildConfig, RoleEntry, User};

use crate::store::{documents, DocumentStore, StorageError};

/// Typed collection layer over a [`DocumentStore`].
#[derive(Clone)]
pub struct Documents {
    store: Arc<dyn DocumentStore>,
}

impl Documents {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for raw document access (export/import, health).
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    async fn read_as<T: DeserializeOwned>(
        &self,
        name: &str,
        default: Value,
    ) -> Result<T, StorageError> {
        let value = self.store.read(name, &default).await?;
        serde_json::from_value(value).map_err(|source| StorageError::Corrupt {
            name: name.to_string(),
            source,
        })
    }

    async fn write_as<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StorageError> {
        self.store.write(name, &serde_json::to_value(value)?).await
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn users(&self) -> Result<Vec<User>, StorageError> {
        self.read_as(documents::USERS, json!([])).await
    }

    pub async fn save_users(&self, users: &[User]) -> Result<(), StorageError> {
        self.write_as(documents::USERS, &users).await
    }

    pub async fn find_user(&self, id: Uuid) -> Result<Option<User>, StorageError> {
        Ok(self.users().await?.into_iter().find(|u| u.id == id))
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, StorageError> {
        Ok(self
            .users()
            .await?
            .into_iter()
            .find(|u| u.username == username))
    }

    // ------------------------------------------------------------------
    // Bot credentials
    // ------------------------------------------------------------------

    pub async fn bot_credentials(&self) -> Result<Vec<BotCredential>, StorageError> {
        self.read_as(documents::BOT_CREDENTIALS, json!([])).await
    }

    pub async fn save_bot_credentials(
        &self,
        bots: &[BotCredential],
    ) -> Result<(), StorageError> {
        self.write_as(documents::BOT_CREDENTIALS, &bots).await
    }

    pub async fn find_bot(&self, id: Uuid) -> Result<Option<BotCredential>, StorageError> {
        Ok(self.bot_credentials().await?.into_iter().find(|b| b.id == id))
    }

    /// Exact-match lookup for the `x-api-key` header.
    pub async fn find_bot_by_api_key(
        &self,
        api_key: &str,
    ) -> Result<Option<BotCredential>, StorageError> {
        Ok(self
            .bot_credentials()
            .await?
            .into_iter()
            .find(|b| b.api_key == api_key))
    }

    // ------------------------------------------------------------------
    // Guild bindings
    // ------------------------------------------------------------------

    pub async fn guild_bindings(&self) -> Result<Vec<GuildBinding>, StorageError> {
        self.read_as(documents::GUILD_BINDINGS, json!([])).await
    }

    pub async fn find_binding(
        &self,
        guild_id: &str,
    ) -> Result<Option<GuildBinding>, StorageError> {
        Ok(self
            .guild_bindings()
            .await?
            .into_iter()
            .find(|b| b.guild_id == guild_id))
    }

    /// Upserts a binding keyed by guild id.
    ///
    /// `bot_id` is always overwritten (a claim may rebind the guild),
    /// `last_seen` is always refreshed, and `name`/`icon` keep their
    /// previous values when the incoming request omits them.
    pub async fn upsert_binding(
        &self,
        guild_id: &str,
        bot_id: Uuid,
        name: Option<String>,
        icon: Option<String>,
    ) -> Result<GuildBinding, StorageError> {
        let mut bindings = self.guild_bindings().await?;

        let binding = match bindings.iter_mut().find(|b| b.guild_id == guild_id) {
            Some(existing) => {
                existing.bot_id = bot_id;
                if name.is_some() {
                    existing.name = name;
                }
                if icon.is_some() {
                    existing.icon = icon;
                }
                existing.last_seen = Utc::now();
                existing.clone()
            }
            None => {
                let binding = GuildBinding {
                    guild_id: guild_id.to_string(),
                    bot_id,
                    name,
                    icon,
                    last_seen: Utc::now(),
                };
                bindings.push(binding.clone());
                binding
            }
        };

        self.write_as(documents::GUILD_BINDINGS, &bindings).await?;
        Ok(binding)
    }

    // ------------------------------------------------------------------
    // Roster snapshots
    // ------------------------------------------------------------------

    pub async fn guild_roles(&self, guild_id: &str) -> Result<Vec<RoleEntry>, StorageError> {
        let map: BTreeMap<String, Vec<RoleEntry>> =
            self.read_as(documents::GUILD_ROLES, json!({})).await?;
        Ok(map.get(guild_id).cloned().unwrap_or_default())
    }

    /// Wholesale-replaces one guild's role snapshot.
    pub async fn replace_guild_roles(
        &self,
        guild_id: &str,
        roles: Vec<RoleEntry>,
    ) -> Result<(), StorageError> {
        let mut map: BTreeMap<String, Vec<RoleEntry>> =
            self.read_as(documents::GUILD_ROLES, json!({})).await?;
        map.insert(guild_id.to_string(), roles);
        self.write_as(documents::GUILD_ROLES, &map).await
    }

    pub async fn guild_channels(
        &self,
        guild_id: &str,
    ) -> Result<Vec<ChannelEntry>, StorageError> {
        let map: BTreeMap<String, Vec<ChannelEntry>> =
            self.read_as(documents::GUILD_CHANNELS, json!({})).await?;
        Ok(map.get(guild_id).cloned().unwrap_or_default())
    }

    /// Wholesale-replaces one guild's channel snapshot.
    pub async fn replace_guild_channels(
        &self,
        guild_id: &str,
        channels: Vec<ChannelEntry>,
    ) -> Result<(), StorageError> {
        let mut map: BTreeMap<String, Vec<ChannelEntry>> =
            self.read_as(documents::GUILD_CHANNELS, json!({})).await?;
        map.insert(guild_id.to_string(), channels);
        self.write_as(documents::GUILD_CHANNELS, &map).await
    }

    // ------------------------------------------------------------------
    // Guild configuration
    // ------------------------------------------------------------------

    /// Returns the stored configuration, or `None` when the guild has
    /// never saved one. Callers render the default in that case; it is
    /// never persisted on read.
    pub async fn guild_config(
        &self,
        guild_id: &str,
    ) -> Result<Option<GuildConfig>, StorageError> {
        let mut map: BTreeMap<String, GuildConfig> =
            self.read_as(documents::GUILD_CONFIGS, json!({})).await?;
        Ok(map.remove(guild_id))
    }

    /// Wholesale-replaces one guild's configuration.
    pub async fn replace_guild_config(
        &self,
        guild_id: &str,
        config: &GuildConfig,
    ) -> Result<(), StorageError> {
        let mut map: BTreeMap<String, GuildConfig> =
            self.read_as(documents::GUILD_CONFIGS, json!({})).await?;
        map.insert(guild_id.to_string(), config.clone());
        self.write_as(documents::GUILD_CONFIGS, &map).await
    }
}
