//! Document storage for the Ticket Panel backend.
//!
//! Everything the service persists lives in named JSON documents behind the
//! [`DocumentStore`] trait. Two interchangeable backends are provided: one
//! file per document ([`FileStore`]) and one row per document in a SQLite
//! key-value table ([`SqliteStore`]). The typed [`Documents`] layer and the
//! [`PublishBoard`] coordinator sit on top of the raw store.

pub mod collections;
pub mod file;
pub mod publish;
pub mod sqlite;
pub mod store;

pub use collections::Documents;
pub use file::FileStore;
pub use publish::PublishBoard;
pub use sqlite::SqliteStore;
pub use store::{documents, DocumentStore, StorageError};
