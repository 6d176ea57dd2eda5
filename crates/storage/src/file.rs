//! Filesystem document store: one pretty-printed JSON file per document.

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::store::{validate_name, DocumentStore, StorageError};

/// Stores each document as `<root>/<name>.json`.
///
/// A missing document is created with its default content on first read.
/// Writes land in a temp file first and are renamed into place, so a failed
/// write never leaves a half-written document behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        Ok(self.root.join(format!("{}.json", name)))
    }

    async fn write_atomic(&self, path: &Path, name: &str, value: &Value) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            name: name.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;

        let pretty = serde_json::to_vec_pretty(value)?;
        let tmp = self.root.join(format!(".{}.json.tmp", name));
        tokio::fs::write(&tmp, &pretty).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read(&self, name: &str, default: &Value) -> Result<Value, StorageError> {
        let path = self.document_path(name)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                name: name.to_string(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(document = name, "Materializing default document");
                self.write_atomic(&path, name, default).await?;
                Ok(default.clone())
            }
            Err(source) => Err(StorageError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }

    async fn write(&self, name: &str, value: &Value) -> Result<(), StorageError> {
        let path = self.document_path(name)?;
        self.write_atomic(&path, name, value).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Io {
                name: "<root>".to_string(),
                source,
            })
    }
}
