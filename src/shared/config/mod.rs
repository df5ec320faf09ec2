//! Application configuration module
//!
//! Configuration is layered: built-in defaults, then an optional TOML file
//! named by `CHAT_CONFIG`, then environment variables. The server binary
//! loads a `.env` file first, so anything in there counts as environment.
//!
//! | Key (TOML)                | Environment               | Default |
//! |---------------------------|---------------------------|---------|
//! | `port`                    | `SERVER_PORT`             | 3000    |
//! | `database_url`            | `DATABASE_URL`            | none    |
//! | `db_max_connections`      | `DB_MAX_CONNECTIONS`      | 10      |
//! | `jwt_secret`              | `JWT_SECRET`              | dev key |
//! | `outbound_queue_capacity` | `OUTBOUND_QUEUE_CAPACITY` | 64      |
//! | `accept_creates_entry`    | `ACCEPT_CREATES_ENTRY`    | true    |

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_QUEUE_CAPACITY: usize = 64;
const DEV_JWT_SECRET: &str = "xfchat-dev-secret-change-in-production";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TCP port the HTTP server binds on
    pub port: u16,
    /// PostgreSQL URL; `None` runs on in-memory stores
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,
    /// Frames buffered per connection before it is treated as dead
    pub outbound_queue_capacity: usize,
    /// Whether accepting a contact with no prior record creates it
    pub accept_creates_entry: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            outbound_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            accept_creates_entry: true,
        }
    }
}

/// Optional overrides read from a TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    database_url: Option<String>,
    db_max_connections: Option<u32>,
    jwt_secret: Option<String>,
    outbound_queue_capacity: Option<usize>,
    accept_creates_entry: Option<bool>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load defaults, then `CHAT_CONFIG` (if set), then environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = match std::env::var("CHAT_CONFIG") {
            Ok(path) => Self::builder().merge_file(path)?,
            Err(_) => Self::builder(),
        };

        if let Some(port) = env_parse::<u16>("SERVER_PORT")? {
            builder = builder.port(port);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                builder = builder.database_url(url);
            }
        }
        if let Some(max) = env_parse::<u32>("DB_MAX_CONNECTIONS")? {
            builder = builder.db_max_connections(max);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(capacity) = env_parse::<usize>("OUTBOUND_QUEUE_CAPACITY")? {
            builder = builder.outbound_queue_capacity(capacity);
        }
        if let Some(flag) = env_parse::<bool>("ACCEPT_CREATES_ENTRY")? {
            builder = builder.accept_creates_entry(flag);
        }

        builder.build()
    }

    /// Whether the JWT secret is still the built-in development key
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "port",
                message: "must be non-zero".to_string(),
            });
        }
        if self.outbound_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "outbound_queue_capacity",
                message: "must be at least 1".to_string(),
            });
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "db_max_connections",
                message: "must be at least 1".to_string(),
            });
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        Ok(())
    }
}

fn env_parse<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key,
                message: format!("{}: {}", raw, e),
            }),
        Err(_) => Ok(None),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn db_max_connections(mut self, max: u32) -> Self {
        self.config.db_max_connections = max;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn outbound_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.outbound_queue_capacity = capacity;
        self
    }

    pub fn accept_creates_entry(mut self, flag: bool) -> Self {
        self.config.accept_creates_entry = flag;
        self
    }

    /// Apply overrides from a TOML document
    pub fn merge_toml(mut self, source: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(port) = file.port {
            self.config.port = port;
        }
        if let Some(url) = file.database_url {
            self.config.database_url = Some(url);
        }
        if let Some(max) = file.db_max_connections {
            self.config.db_max_connections = max;
        }
        if let Some(secret) = file.jwt_secret {
            self.config.jwt_secret = secret;
        }
        if let Some(capacity) = file.outbound_queue_capacity {
            self.config.outbound_queue_capacity = capacity;
        }
        if let Some(flag) = file.accept_creates_entry {
            self.config.accept_creates_entry = flag;
        }
        Ok(self)
    }

    /// Apply overrides from a TOML file on disk
    pub fn merge_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.merge_toml(&source)
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("failed to read config file {path}: {message}")]
    Io { path: String, message: String },
}
