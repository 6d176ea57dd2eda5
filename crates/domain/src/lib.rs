//! Domain layer for the Ticket Panel backend.
//!
//! Serde-serializable records held in the document store: users, bot
//! credentials, guild bindings, roster snapshots, guild configuration,
//! and the publish flag.

pub mod models;
