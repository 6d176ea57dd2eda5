//! HTTP route handlers.

pub mod admin;
pub mod bot_credentials;
pub mod bots;
pub mod guilds;
pub mod health;
pub mod me;
pub mod sessions;
pub mod users;
