//! Configuration module
//!
//! The service reads a single TOML file. Every section and key is optional;
//! anything left out falls back to the defaults below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! url = "sqlite://./catalog.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "text"
//!
//! [stock_clearing]
//! enabled = true
//! interval_secs = 86400
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::StockPolicy;
use crate::infrastructure::DatabaseConfig;
use crate::shared::DomainResult;

/// Environment variable pointing at the config file
pub const CONFIG_ENV: &str = "CATALOG_CONFIG";
/// Environment variable overriding `database.url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default location: `<config_dir>/game-catalog/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("game-catalog")
        .join("config.toml")
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Seconds to wait for in-flight work on shutdown
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        DatabaseConfig {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `game_catalog=debug`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Background stock clearing job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockClearingConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    /// Games released at least this many months ago are deleted
    pub delete_after_months: u32,
    /// Games released at least this many months ago are discounted
    pub discount_after_months: u32,
    pub discount_percent: u32,
}

impl StockClearingConfig {
    pub fn policy(&self) -> DomainResult<StockPolicy> {
        StockPolicy::new(
            self.delete_after_months,
            self.discount_after_months,
            self.discount_percent,
        )
    }
}

impl Default for StockClearingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 86_400,
            delete_after_months: 18,
            discount_after_months: 12,
            discount_percent: 20,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub stock_clearing: StockClearingConfig,
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    ///
    /// `DATABASE_URL` takes precedence over `database.url`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.is_empty() {
                config.database.url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from `CATALOG_CONFIG` or the default path
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());
        Self::load(path)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stock_clearing.enabled && self.stock_clearing.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "stock_clearing.interval_secs must be positive".to_string(),
            ));
        }
        self.stock_clearing
            .policy()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}
