//! Persistent client settings.
//!
//! Settings are stored as JSON and survive restarts. Every field has a
//! default so an embedder can run without a settings file at all.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Storefront API base URL used when no settings file exists.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Client settings persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the storefront API (no trailing slash).
    pub base_url: String,
    /// Seconds between cart badge refreshes (default: 30).
    pub poll_interval_secs: u64,
    /// Seconds a flash message stays visible before auto-dismiss (default: 5).
    pub flash_dismiss_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: 30,
            flash_dismiss_secs: 5,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Returns defaults if file doesn't exist.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse settings file: {} — using defaults", e);
                Self::default()
            }),
            Err(_) => {
                tracing::info!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file.
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Badge poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Flash dismiss delay as a `Duration`.
    pub fn flash_dismiss(&self) -> Duration {
        Duration::from_secs(self.flash_dismiss_secs)
    }
}
