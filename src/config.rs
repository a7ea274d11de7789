//! Process configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `HOST`: listen address (default `0.0.0.0`)
//! - `PORT`: listen port (default `8000`)
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when
//!   `STORAGE_MODE=postgres`)
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default `10`)
//! - `STATIC_DIR`: directory served under `/static` (default `static`)
//! - `CORS_ORIGINS`: comma-separated allowed origins; empty allows any

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default maximum number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 10;
/// Default static asset directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `STORAGE_MODE` holds an unrecognised value.
    #[error("invalid STORAGE_MODE '{0}', expected one of: in_memory, postgres")]
    InvalidStorageMode(String),

    /// `DATABASE_URL` is missing while PostgreSQL storage is selected.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A numeric variable could not be parsed or is out of range.
    #[error("invalid {name} '{value}': {reason}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The host and port do not form a socket address.
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),
}

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// In-memory storage; contents are lost on exit.
    #[default]
    InMemory,
    /// `PostgreSQL` storage.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Storage configuration resolved from the selected mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// In-memory storage.
    InMemory,
    /// `PostgreSQL` storage.
    Postgres {
        /// Connection URL.
        database_url: String,
        /// Maximum pooled connections.
        pool_size: u32,
    },
}

impl StorageConfig {
    /// Returns the mode this configuration selects.
    #[must_use]
    pub const fn mode(&self) -> StorageMode {
        match self {
            Self::InMemory => StorageMode::InMemory,
            Self::Postgres { .. } => StorageMode::Postgres,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Directory holding `index.html` and `/static` assets.
    pub static_dir: PathBuf,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpConfig {
    /// Returns the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] when the host is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub http: HttpConfig,
    /// Storage backend settings.
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            storage: StorageConfig::InMemory,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value or
    /// `DATABASE_URL` is missing for `PostgreSQL` storage.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = read("PORT")
            .map(|value| parse_number::<u16>("PORT", value))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);
        let static_dir = read("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);
        let cors_origins = read("CORS_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();
        let storage = match mode {
            StorageMode::InMemory => StorageConfig::InMemory,
            StorageMode::Postgres => {
                let database_url = read("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;
                let pool_size = read("DATABASE_POOL_SIZE")
                    .map(|value| parse_number::<u32>("DATABASE_POOL_SIZE", value))
                    .transpose()?
                    .unwrap_or(DEFAULT_POOL_SIZE);
                if pool_size == 0 {
                    return Err(ConfigError::InvalidNumber {
                        name: "DATABASE_POOL_SIZE",
                        value: pool_size.to_string(),
                        reason: "must be greater than zero".to_owned(),
                    });
                }
                StorageConfig::Postgres {
                    database_url,
                    pool_size,
                }
            }
        };

        Ok(Self {
            http: HttpConfig {
                host,
                port,
                static_dir,
                cors_origins,
            },
            storage,
        })
    }
}

fn parse_number<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::InvalidNumber {
        name,
        reason: err.to_string(),
        value,
    })
}
