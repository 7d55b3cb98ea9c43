//! # Configuration
//!
//! Recall configuration is managed by [`confique`], which handles layered
//! loading from environment variables, a TOML file, and compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `RECALL_API_URL`, `RECALL_TIMEOUT_SECS`, `RECALL_CHAT_URL`.
//! 2. **Config file**: `recall.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_url` | `https://sheetsapi-g56q77hy2a-uc.a.run.app` | Sheets REST service |
//! | `timeout_secs` | `30` | Per-request timeout |
//! | `chat_url` | `https://claude.ai/new` | Page opened by `recall ask` |
//!
//! The spreadsheet id is *not* configuration: it is connection state, kept by
//! [`crate::settings`].

use crate::error::{RecallError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "recall.toml";
pub const DEFAULT_API_URL: &str = "https://sheetsapi-g56q77hy2a-uc.a.run.app";
pub const DEFAULT_CHAT_URL: &str = "https://claude.ai/new";

/// Service account the spreadsheet must be shared with.
pub const SERVICE_ACCOUNT_EMAIL: &str = "sheets-db@sheets-db-438616.iam.gserviceaccount.com";

/// Configuration for recall, stored in `recall.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecallConfig {
    /// Base URL of the sheets REST service.
    #[config(env = "RECALL_API_URL", default = "https://sheetsapi-g56q77hy2a-uc.a.run.app")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[config(env = "RECALL_TIMEOUT_SECS", default = 30)]
    pub timeout_secs: u64,

    /// Chat page that `recall ask` pre-fills.
    #[config(env = "RECALL_CHAT_URL", default = "https://claude.ai/new")]
    pub chat_url: String,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            chat_url: DEFAULT_CHAT_URL.to_string(),
        }
    }
}

impl RecallConfig {
    /// Loads env, then `{data_dir}/recall.toml`, then defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        RecallConfig::builder()
            .env()
            .file(data_dir.join(CONFIG_FILENAME))
            .load()
            .map_err(|e| RecallError::Config(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// The directory holding `settings.json` and `recall.toml`.
///
/// An explicit override wins; otherwise the OS data directory is used
/// (e.g. `~/.local/share/recall` on Linux).
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    ProjectDirs::from("com", "recall", "recall")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RecallError::Config("Could not determine data directory".to_string()))
}
