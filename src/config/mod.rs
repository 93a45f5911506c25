//! Configuration management for modelprefs

mod keys;

pub use keys::{Action, ActionGroup, KeyBindings};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding `Config::endpoint`.
pub const ENDPOINT_ENV: &str = "MODELPREFS_ENDPOINT";

/// Environment variable overriding `Config::token`.
pub const TOKEN_ENV: &str = "MODELPREFS_TOKEN";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token sent with every request, if any
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Poll interval in milliseconds for terminal events
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// How long a toast stays on screen, in milliseconds
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,

    /// Keybindings configuration
    #[serde(default)]
    pub keys: KeyBindings,
}

fn default_endpoint() -> String {
    "http://localhost:8080/graphql".to_string()
}

const fn default_request_timeout() -> u64 {
    10
}

const fn default_poll_interval() -> u64 {
    100
}

const fn default_toast_duration() -> u64 {
    4000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            request_timeout_secs: default_request_timeout(),
            poll_interval_ms: default_poll_interval(),
            toast_duration_ms: default_toast_duration(),
            keys: KeyBindings::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        // Ensure any new default keybindings are available
        config.keys.merge_defaults();
        Ok(config)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Apply `MODELPREFS_ENDPOINT` / `MODELPREFS_TOKEN` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, mut var: impl FnMut(&str) -> Option<String>) {
        if let Some(endpoint) = var(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(%endpoint, "Endpoint overridden from environment");
            self.endpoint = endpoint;
        }
        if let Some(token) = var(TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token);
        }
    }

    /// Apply command-line overrides; `None` keeps the current value
    pub fn apply_overrides(&mut self, endpoint: Option<String>, token: Option<String>) {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
    }

    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Terminal event poll interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Toast lifetime
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}
