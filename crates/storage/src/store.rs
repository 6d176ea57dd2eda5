//! The document store contract.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Logical names of the persisted documents.
pub mod documents {
    pub const USERS: &str = "users";
    pub const BOT_CREDENTIALS: &str = "bot-credentials";
    pub const GUILD_BINDINGS: &str = "guild-bindings";
    pub const GUILD_ROLES: &str = "guild-roles";
    pub const GUILD_CHANNELS: &str = "guild-channels";
    pub const GUILD_CONFIGS: &str = "guild-configs";
    pub const PUBLISH_FLAGS: &str = "publish-flags";

    /// All document names, in export order.
    pub const ALL: [&str; 7] = [
        USERS,
        BOT_CREDENTIALS,
        GUILD_BINDINGS,
        GUILD_ROLES,
        GUILD_CHANNELS,
        GUILD_CONFIGS,
        PUBLISH_FLAGS,
    ];
}

/// Error type for document store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid document name: {0}")]
    InvalidName(String),

    #[error("I/O error on document {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document {name} holds malformed JSON: {source}")]
    Corrupt {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A keyed mapping of document names to JSON values, one read/write per
/// document.
///
/// Both implementations guarantee:
/// - `read` materializes (persists) `default` the first time a document is
///   read before it exists, and never returns absence afterwards;
/// - `write` fully replaces the document, atomically per document;
/// - concurrent writes to the same document are not ordered by this layer
///   (last write wins).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document, materializing `default` if it does not exist yet.
    async fn read(&self, name: &str, default: &Value) -> Result<Value, StorageError>;

    /// Replaces a document wholesale.
    async fn write(&self, name: &str, value: &Value) -> Result<(), StorageError>;

    /// Probes the backend for the health endpoint.
    async fn ping(&self) -> Result<(), StorageError>;
}

/// Validates a document name: lowercase alphanumerics and dashes only.
///
/// Names become file names and primary keys; anything else is rejected
/// before it reaches a backend.
pub fn validate_name(name: &str) -> Result<(), StorageError> {
    if !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}
