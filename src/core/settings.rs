//! # Durable Settings
//!
//! Small key-value state that survives restarts, stored as JSON at
//! `~/.glide/settings.json`. Unlike `config.toml` this file is written by the
//! program, so every write goes through an atomic rename (write `.tmp`, then
//! `rename()`).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicit user override for directional-input mode. Wins over detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_directional: Option<bool>,
    /// First heuristic detection result. Served on later starts until
    /// `--remote auto` clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_directional: Option<bool>,
}

#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {e}"),
            SettingsError::Json(e) => write!(f, "settings parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Returns `~/.glide/settings.json`.
pub fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".glide").join("settings.json"))
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(SettingsError::Io)?;
        serde_json::from_str(&json).map_err(SettingsError::Json)
    }

    /// Atomically write settings to `path`, creating the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SettingsError::Io)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Json)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, json).map_err(SettingsError::Io)?;
        fs::rename(&tmp_path, path).map_err(SettingsError::Io)?;
        debug!("Settings saved to {}", path.display());
        Ok(())
    }
}
