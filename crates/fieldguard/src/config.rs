// File: src/config.rs
// Purpose: Environment-selected configuration with optional fieldguard.toml overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Environment variable that selects the configuration variant
pub const ENV_VAR: &str = "APP_ENV";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Case-insensitive; anything other than "production" is development
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    /// Read `APP_ENV`, defaulting to development when unset
    pub fn from_env() -> Self {
        std::env::var(ENV_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub environment: Environment,

    /// Enables DEBUG-level logging
    pub debug: bool,

    #[serde(default)]
    pub logging: LogConfig,
}

/// Logger sink configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory holding `{name}.log` files
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Rotate once a file would grow past this many bytes (0 disables rotation)
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Rotated backups to keep
    #[serde(default = "default_max_files")]
    pub max_files: u32,

    /// Also write to stderr
    #[serde(default = "default_true")]
    pub console: bool,
}

/// Shape of fieldguard.toml; only logging can be overridden
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    logging: Option<LogConfig>,
}

// Default values
fn default_log_dir() -> PathBuf {
    PathBuf::from("tmp/logs")
}

fn default_max_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_max_files() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            max_bytes: default_max_bytes(),
            max_files: default_max_files(),
            console: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::development()
    }
}

impl Config {
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            debug: true,
            logging: LogConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            debug: false,
            logging: LogConfig::default(),
        }
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
        }
    }

    /// Select a variant from an optional environment string
    pub fn from_env_value(value: Option<&str>) -> Self {
        Self::for_environment(value.map(Environment::parse).unwrap_or_default())
    }

    /// Select a variant from `APP_ENV`
    pub fn from_env() -> Self {
        Self::for_environment(Environment::from_env())
    }

    /// Load the variant for `environment`, applying overrides from a TOML file
    pub fn load(path: impl AsRef<Path>, environment: Environment) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::for_environment(environment);

        // A missing file means no overrides
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(config);
        }

        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        Ok(config)
    }

    /// Load from ./fieldguard.toml for the `APP_ENV` environment
    pub fn load_default() -> Result<Self> {
        Self::load("fieldguard.toml", Environment::from_env())
    }

    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}
