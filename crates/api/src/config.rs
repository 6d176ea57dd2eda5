use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Storage backend selection: the same document contract is served either
/// from a directory of JSON files or from a SQLite key-value table.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Data directory for the `file` backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Connection URL for the `sqlite` backend.
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origins; empty means any origin (development).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Session tokens and the bootstrap admin identity.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing session tokens.
    pub token_secret: String,

    /// Session lifetime in seconds (default: 604800 = 7 days).
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,

    /// Username of the configured admin. Used by the admin login (compared
    /// directly, see the design notes) and by the startup seed.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Password of the configured admin. Empty disables admin login and
    /// the seed step.
    #[serde(default)]
    pub admin_password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_storage_backend() -> String {
    "file".to_string()
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_database_url() -> String {
    "sqlite://data/panel.db".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_token_expiry() -> i64 {
    604_800
}
fn default_admin_username() -> String {
    "admin".to_string()
}

/// Configuration validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with TP__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("TP").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.auth.token_secret.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "auth.token_secret".to_string(),
            ));
        }
        match self.storage.backend.as_str() {
            "file" | "sqlite" => {}
            other => {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "storage.backend must be \"file\" or \"sqlite\", got {:?}",
                    other
                )))
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }
}
