//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreBackend,
    /// Required when `store` is `Postgres`
    pub database: Option<DatabaseConfig>,
    pub cache: CacheConfig,
    pub session: SessionConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which user store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Session cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Redis URL; sessions stay in process memory when unset
    pub redis_url: Option<String>,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
}

// Default value functions
fn parse_var<T: FromStr>(key: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|s| s.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue(key, s)))
        .transpose()
}

fn default_app_name() -> String {
    "user-domain".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_session_ttl() -> u64 {
    3600 // 1 hour
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a variable lookup function
    ///
    /// # Errors
    /// Returns an error if required variables are missing or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &'static str| parse_var::<u64>(key, lookup(key));
        let pool_size = |key: &'static str| parse_var::<u32>(key, lookup(key));

        let store = match lookup("USER_STORE") {
            None => StoreBackend::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "postgres" => StoreBackend::Postgres,
                "memory" => StoreBackend::Memory,
                _ => return Err(ConfigError::InvalidValue("USER_STORE", s)),
            },
        };

        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: pool_size("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: pool_size("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
            }),
            None if store == StoreBackend::Postgres => {
                return Err(ConfigError::MissingVar("DATABASE_URL"))
            }
            None => None,
        };

        let log_format = match lookup("LOG_FORMAT") {
            None => LogFormat::default(),
            Some(s) => match s.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => return Err(ConfigError::InvalidValue("LOG_FORMAT", s)),
            },
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
                log_format,
            },
            store,
            database,
            cache: CacheConfig {
                redis_url: lookup("REDIS_URL"),
                max_connections: pool_size("REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
            },
            session: SessionConfig {
                ttl_seconds: parsed("SESSION_TTL_SECONDS")?.unwrap_or_else(default_session_ttl),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
