//! Domain models.

pub mod bot_credential;
pub mod guild;
pub mod guild_config;
pub mod publish;
pub mod user;

pub use bot_credential::{BotCredential, BotCredentialView};
pub use guild::{ChannelEntry, GuildBinding, RoleEntry};
pub use guild_config::GuildConfig;
pub use publish::{PublishFlag, PublishStatus};
pub use user::{User, UserView};
