//! Configuration management for SR Triage.
//!
//! Loads settings from an explicit path, $SRTRIAGE_CONFIG,
//! /etc/srtriage/config.toml or ./srtriage.toml, falling back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// System-wide config file path
pub const CONFIG_PATH: &str = "/etc/srtriage/config.toml";

/// Working-directory config file path
pub const LOCAL_CONFIG_PATH: &str = "srtriage.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SRTRIAGE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the daemon binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Maximum request body size in bytes (uploads included)
    #[serde(default = "default_max_body")]
    pub max_body_bytes: usize,

    /// Allow cross-origin requests from any origin (browser frontend)
    #[serde(default = "default_cors_any")]
    pub cors_allow_any_origin: bool,
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_max_body() -> usize {
    25 * 1024 * 1024
}

fn default_cors_any() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body(),
            cors_allow_any_origin: default_cors_any(),
        }
    }
}

impl ServerConfig {
    /// Base URL a local client should use to reach the daemon
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind)
    }
}

/// Model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_priority_model")]
    pub priority_model: PathBuf,

    #[serde(default = "default_team_model")]
    pub team_model: PathBuf,
}

fn default_priority_model() -> PathBuf {
    PathBuf::from("models/priority_classifier.json")
}

fn default_team_model() -> PathBuf {
    PathBuf::from("models/team_classifier.json")
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            priority_model: default_priority_model(),
            team_model: default_team_model(),
        }
    }
}

/// Ledger and upload locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_submissions")]
    pub submissions_csv: PathBuf,

    #[serde(default = "default_corrections")]
    pub corrections_csv: PathBuf,

    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
}

fn default_submissions() -> PathBuf {
    PathBuf::from("data/submissions.csv")
}

fn default_corrections() -> PathBuf {
    PathBuf::from("data/corrections.csv")
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            submissions_csv: default_submissions(),
            corrections_csv: default_corrections(),
            upload_dir: default_upload_dir(),
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load config, or return defaults.
    ///
    /// An explicit path that cannot be loaded is an error; the implicit
    /// locations fall through silently.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from_path(Path::new(&path));
        }

        for candidate in [CONFIG_PATH, LOCAL_CONFIG_PATH] {
            let path = Path::new(candidate);
            if path.is_file() {
                return Self::load_from_path(path);
            }
        }

        warn!("Config not found, using defaults");
        Ok(Config::default())
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
