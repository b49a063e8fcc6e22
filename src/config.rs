//! Client configuration
//!
//! `ClientConfig` is read from a JSON file whose field names match the
//! upstream client (`apiKey`, `timeoutSeconds`, `redisConfig`,
//! `cacheDuration`). Missing fields fall back to defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the API key from the config file
pub const API_KEY_ENV: &str = "VSPORTS_API_KEY";

/// Default transport timeout in seconds
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default cache TTL in seconds
const DEFAULT_CACHE_DURATION: u64 = 300;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `ClientConfig`
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No path was given and no home directory is available
    #[error("Cannot determine the default config directory")]
    NoConfigDir,
}

/// Connection parameters for the Redis cache store
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// `host:port` of the Redis server
    pub addr: String,
    /// Password, empty for none
    pub password: String,
    /// Database index
    pub db: i64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:6379".to_string(),
            password: String::new(),
            db: 0,
        }
    }
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("addr", &self.addr)
            .field("password", &redact(&self.password))
            .field("db", &self.db)
            .finish()
    }
}

/// Settings for a `VsportsClient`
///
/// Built once at startup and consumed by the client; the client copies out
/// what it needs and never changes it afterwards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Bearer token sent with every API request
    pub api_key: String,
    /// Whole-request timeout; 0 disables the timeout
    pub timeout_seconds: u64,
    /// Cache store connection
    pub redis_config: RedisConfig,
    /// TTL for every cache write; 0 stores entries without expiry
    pub cache_duration: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            redis_config: RedisConfig::default(),
            cache_duration: DEFAULT_CACHE_DURATION,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("redis_config", &self.redis_config)
            .field("cache_duration", &self.cache_duration)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl ClientConfig {
    /// Creates a config with the given API key and defaults elsewhere
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Transport timeout, or `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    /// TTL applied to cache writes
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }

    /// Reads a config from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config used by the binary
    ///
    /// Reads `path` if given, otherwise the default file from
    /// [`default_config_path`]. A non-empty `VSPORTS_API_KEY` replaces the
    /// file's API key.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = default_config_path().ok_or(ConfigError::NoConfigDir)?;
                Self::from_file(&path)?
            }
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api_key = key;
            }
        }

        Ok(config)
    }
}

/// XDG-compliant location of the config file
///
/// `~/.config/vsports/config.json` on Linux, or the platform equivalent.
/// Returns `None` if no home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("pt", "vsports", "vsports")?;
    Some(project_dirs.config_dir().join("config.json"))
}
