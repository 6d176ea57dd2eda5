//! The publish coordinator: a per-guild single-slot mailbox.
//!
//! The panel requests a publish when an operator wants new configuration
//! pushed live; the external bot polls `peek` or `consume` on its own
//! schedule. A second request before the first consume overwrites the slot.

use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;

use domain::models::{PublishFlag, PublishStatus};

use crate::collections::Documents;
use crate::store::{documents, StorageError};

/// Coordinates publish flags over the `publish-flags` document
/// (guild id → pending flag).
#[derive(Clone)]
pub struct PublishBoard {
    docs: Documents,
}

impl PublishBoard {
    pub fn new(docs: Documents) -> Self {
        Self { docs }
    }

    async fn flags(&self) -> Result<BTreeMap<String, PublishFlag>, StorageError> {
        let value = self
            .docs
            .store()
            .read(documents::PUBLISH_FLAGS, &json!({}))
            .await?;
        serde_json::from_value(value).map_err(|source| StorageError::Corrupt {
            name: documents::PUBLISH_FLAGS.to_string(),
            source,
        })
    }

    async fn save(&self, flags: &BTreeMap<String, PublishFlag>) -> Result<(), StorageError> {
        self.docs
            .store()
            .write(documents::PUBLISH_FLAGS, &serde_json::to_value(flags)?)
            .await
    }

    /// Raises the flag for a guild. Overwrites any pending flag: the last
    /// request wins and the timestamp is refreshed.
    pub async fn request(
        &self,
        guild_id: &str,
        by_user: Option<String>,
    ) -> Result<PublishFlag, StorageError> {
        let mut flags = self.flags().await?;
        let flag = PublishFlag {
            requested_at: Utc::now(),
            by_user,
        };
        flags.insert(guild_id.to_string(), flag.clone());
        self.save(&flags).await?;

        debug!(guild_id, "Publish requested");
        Ok(flag)
    }

    /// Returns the current state without transitioning.
    pub async fn peek(&self, guild_id: &str) -> Result<PublishStatus, StorageError> {
        let flags = self.flags().await?;
        Ok(match flags.get(guild_id) {
            Some(flag) => PublishStatus::pending(flag.clone()),
            None => PublishStatus::empty(),
        })
    }

    /// Takes the pending flag if there is one. Consuming an empty slot is
    /// a no-op that reports `pending: false`.
    pub async fn consume(&self, guild_id: &str) -> Result<PublishStatus, StorageError> {
        let mut flags = self.flags().await?;
        match flags.remove(guild_id) {
            Some(flag) => {
                self.save(&flags).await?;
                debug!(guild_id, "Publish flag consumed");
                Ok(PublishStatus::pending(flag))
            }
            None => Ok(PublishStatus::empty()),
        }
    }
}
