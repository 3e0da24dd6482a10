//! User settings read from `~/.tasklane/config.toml`.
//!
//! A missing file is not an error; every field has a default. Command-line
//! flags override whatever is loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::strategy::SortStrategy;

const APP_DIR_NAME: &str = ".tasklane";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Identity of the acting user; tasks are scoped to it.
    pub owner: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub list: SortStrategy,
    pub logging: LoggingSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `warn` or `tasklane_core=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

impl Settings {
    /// Loads settings from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }
}

fn app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(APP_DIR_NAME))
}

pub fn default_data_dir() -> Result<PathBuf> {
    app_dir()
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join(CONFIG_FILE_NAME))
}
