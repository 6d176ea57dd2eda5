//! Request extractors for the two credential kinds.

pub mod bot_key;
pub mod session;

pub use bot_key::BotKeyAuth;
pub use session::{AdminSession, SessionAuth};
