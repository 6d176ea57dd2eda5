//! SQLite document store: one row per document in a key-value table.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::store::{validate_name, DocumentStore, StorageError};

/// Stores documents in `documents(name TEXT PRIMARY KEY, payload TEXT)`.
///
/// Reads insert the default payload with `INSERT OR IGNORE` before
/// selecting, giving the same first-read materialization as the file
/// backend. Writes are plain upserts: last write wins.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects to the given SQLite URL (e.g. `sqlite://data/panel.db` or
    /// `sqlite::memory:`), creating the database file and the documents
    /// table as needed.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(StorageError::Database)?
            .create_if_missing(true);

        // Single connection: SQLite serializes writers anyway, and an
        // in-memory database exists per connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                 name TEXT PRIMARY KEY,
                 payload TEXT NOT NULL
             )",
        )
        .execute(&pool)
        .await?;

        info!(url, "Document table ready");
        Ok(Self { pool })
    }

    /// Wraps an existing pool (tests).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn read(&self, name: &str, default: &Value) -> Result<Value, StorageError> {
        validate_name(name)?;

        let default_payload = serde_json::to_string(default)?;
        sqlx::query("INSERT OR IGNORE INTO documents (name, payload) VALUES (?1, ?2)")
            .bind(name)
            .bind(&default_payload)
            .execute(&self.pool)
            .await?;

        let (payload,): (String,) =
            sqlx::query_as("SELECT payload FROM documents WHERE name = ?1")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        serde_json::from_str(&payload).map_err(|source| StorageError::Corrupt {
            name: name.to_string(),
            source,
        })
    }

    async fn write(&self, name: &str, value: &Value) -> Result<(), StorageError> {
        validate_name(name)?;

        let payload = serde_json::to_string(value)?;
        sqlx::query(
            "INSERT INTO documents (name, payload) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET payload = excluded.payload",
        )
        .bind(name)
        .bind(&payload)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
