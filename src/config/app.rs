//! Application configuration loading from config.toml and the environment.
//!
//! `config.toml` is optional; every field has a default and the
//! `DATABASE_URL` / `UPLOAD_ROOT` environment variables take precedence, so
//! a bare checkout runs with a local sqlite file and `data/uploads`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

fn default_database_url() -> String {
    "sqlite://data/school_cms.sqlite?mode=rwc".to_string()
}

fn default_upload_root() -> String {
    "data/uploads".to_string()
}

/// Configuration structure representing the config.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Database connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Directory the blob store writes under
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            upload_root: default_upload_root(),
        }
    }
}

impl AppConfig {
    /// Applies environment-variable overrides on top of the file values.
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = url;
        }
        if let Ok(root) = std::env::var("UPLOAD_ROOT") {
            self.upload_root = root;
        }
        self
    }
}

/// Loads configuration from a TOML file, then applies env overrides.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read config file: {e}"),
        })?;
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?
    } else {
        AppConfig::default()
    };

    Ok(config.apply_env_overrides())
}

/// Loads configuration from the default location (./config.toml).
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<AppConfig> {
    load_config("config.toml")
}
