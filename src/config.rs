//! User configuration and on-disk locations.
//!
//! | Purpose | Linux | Override |
//! |---------|-------|----------|
//! | Config  | `~/.config/studydesk/config.toml` | `STUDYDESK_CONFIG_DIR` |
//! | Data    | `~/.local/share/studydesk/planner.db` | `STUDYDESK_DATA_DIR` |

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::timer::TimerDurations;

const APP_DIR: &str = "studydesk";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_FILE_NAME: &str = "planner.db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Planner database. Defaults to [`data_dir`]`/planner.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Show a notification when a timer interval ends.
    pub notifications: bool,
    pub timer: TimerDurations,
    /// Timer color theme shown by the desktop window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_theme: Option<String>,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config {:?}", path))?;
        config.timer.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {:?}", path))?;
        Ok(())
    }

    pub fn data_file_path(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| data_dir().join(DATA_FILE_NAME))
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("STUDYDESK_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/studydesk-config"))
}

pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("STUDYDESK_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/studydesk-data"))
}

pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
