//! Configuration module
//!
//! Environment-driven configuration for the store backends, the caption
//! collaborator, and the settle policy. The binary loads `.env` via dotenvy
//! before calling `from_env`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_SETTLE_CREATE_MS, DEFAULT_SETTLE_DELETE_MS, LOCAL_STORE_FILE};

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Remote spreadsheet web-app endpoint. Unset means local-only mode.
    pub sheet_url: Option<String>,
    /// Path of the local fallback store file.
    pub local_store_path: PathBuf,
    /// Directory for decoded preview files.
    pub preview_dir: PathBuf,
    /// Caption collaborator credential. Unset degrades to a placeholder.
    pub gemini_api_key: Option<String>,
    /// Settle delay after create before a refresh is reliable.
    pub settle_create: Duration,
    /// Settle delay after delete before a refresh is reliable.
    pub settle_delete: Duration,
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_millis(key: &str, default_ms: u64) -> Result<Duration, anyhow::Error> {
    match env_opt(key) {
        Some(raw) => {
            let ms: u64 = raw
                .parse()
                .map_err(|e| anyhow::anyhow!("{} must be an integer millisecond count: {}", key, e))?;
            Ok(Duration::from_millis(ms))
        }
        None => Ok(Duration::from_millis(default_ms)),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let local_store_path = env_opt("PAFOLIO_LOCAL_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join(LOCAL_STORE_FILE));

        let preview_dir = env_opt("PAFOLIO_PREVIEW_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("pafolio-previews"));

        Ok(Config {
            sheet_url: env_opt("PAFOLIO_SHEET_URL"),
            local_store_path,
            preview_dir,
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            settle_create: env_millis("PAFOLIO_SETTLE_CREATE_MS", DEFAULT_SETTLE_CREATE_MS)?,
            settle_delete: env_millis("PAFOLIO_SETTLE_DELETE_MS", DEFAULT_SETTLE_DELETE_MS)?,
        })
    }

    /// Whether the remote persistence collaborator is configured.
    pub fn has_remote(&self) -> bool {
        self.sheet_url.is_some()
    }
}
