//! Connection settings.
//!
//! Which spreadsheet recall talks to is kept in a small JSON file,
//! `settings.json`, in the data directory. The value is loaded once at
//! startup and passed explicitly into everything that needs it; nothing reads
//! it from ambient state.
//!
//! ```text
//! {data_dir}/
//! ├── settings.json   # {"spreadsheetId": "...", "lastValidated": "..."}
//! └── recall.toml     # optional, see crate::config
//! ```
//!
//! The store has a simple lifecycle: [`SettingsStore::load`] (read),
//! [`SettingsStore::save`] (written by a successful connect) and
//! [`SettingsStore::clear`] (disconnect).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub spreadsheet_id: String,
    pub last_validated: String,
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(SETTINGS_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when recall has not been connected yet.
    pub fn load(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Removes the settings file. Clearing twice is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
