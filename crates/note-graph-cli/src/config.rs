//! CLI configuration management.
//!
//! Precedence, lowest to highest: built-in defaults, JSON config file under
//! the platform config directory, then `NG_*` environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use note_graph_core::Depth;
use serde::{Deserialize, Serialize};

/// Application-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault directory commands operate on when `--vault` is not given.
    pub vault_dir: PathBuf,

    /// Traversal depth used when `--depth` is not given.
    pub default_depth: Depth,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_dir: PathBuf::from("."),
            default_depth: Depth::ONE,
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path).with_context(|| {
                    format!("Failed to read config from {}", config_path.display())
                })?;
                config = serde_json::from_str(&contents)
                    .with_context(|| "Failed to parse config file")?;
            }
        }

        if let Ok(vault_dir) = std::env::var("NG_VAULT_DIR") {
            config.vault_dir = PathBuf::from(vault_dir);
        }
        if let Ok(depth) = std::env::var("NG_DEFAULT_DEPTH") {
            config.default_depth = depth
                .parse()
                .with_context(|| "Invalid NG_DEFAULT_DEPTH")?;
        }

        Ok(config)
    }

    /// Path of the JSON config file, if a platform config directory exists.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "note-graph", "ng")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
