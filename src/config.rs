use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use validator::{Validate, ValidationError};
use crate::core::{DistanceFormula, UnlocatedPolicy};

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub database: DatabaseSettings,
    #[serde(default)]
    #[validate(nested)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[validate(range(min = 1))]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(range(min = 1))]
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    /// Open the database read-only; ignored when migrations run
    #[serde(default = "default_true")]
    pub read_only: bool,
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: None,
            min_connections: None,
            acquire_timeout_secs: None,
            read_only: true,
            run_migrations: false,
        }
    }
}

fn default_database_url() -> String { "sqlite://food_trucks.db".to_string() }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_limits"))]
pub struct MatchingSettings {
    /// Page size when the request gives no usable `limit`
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Optional cap on the page size a client may request
    #[validate(range(min = 1))]
    pub max_limit: Option<usize>,
    #[serde(default)]
    pub distance_formula: DistanceFormula,
    #[serde(default)]
    pub unlocated: UnlocatedPolicy,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: None,
            distance_formula: DistanceFormula::default(),
            unlocated: UnlocatedPolicy::default(),
        }
    }
}

fn default_limit() -> usize { 10 }

fn validate_limits(matching: &MatchingSettings) -> Result<(), ValidationError> {
    match matching.max_limit {
        Some(cap) if matching.default_limit > cap => {
            Err(ValidationError::new("default_limit_exceeds_max_limit"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRUCKS_)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, SettingsError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRUCKS__SERVER__PORT -> server.port
            .add_source(environment());

        Self::from_builder(builder)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, SettingsError> {
        let builder = match std::env::var("DATABASE_URL") {
            Ok(url) => builder.set_override("database.url", url)?,
            Err(_) => builder,
        };

        Self::from_config(builder.build()?)
    }

    /// Deserialize and validate an already-built configuration
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TRUCKS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
