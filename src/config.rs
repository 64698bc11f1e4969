//! Settings loaded from `~/.config/luapad/config.toml`.
//!
//! The file is optional; every key has a default.
//!
//! ```toml
//! fallback_url = "http://luapi.example.org"
//! fallback_namespace = "global"
//! connect_timeout_secs = 10
//! timeout_secs = 30
//! debounce_ms = 150
//! store_path = "/tmp/luapad-storage.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::protocol::{Fallback, FALLBACK_NAMESPACE, FALLBACK_URL};

/// User settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// URL used when a script has fewer than two config markers.
    pub fallback_url: String,
    /// Namespace used when a script has fewer than two config markers.
    pub fallback_namespace: String,
    /// TCP connect timeout.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout. Unset means no timeout beyond the transport's own.
    pub timeout_secs: Option<u64>,
    /// Quiet period before a burst of file events counts as one change.
    pub debounce_ms: u64,
    /// Location of the `defaultURL` store. Defaults to the platform data dir.
    pub store_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fallback_url: FALLBACK_URL.to_string(),
            fallback_namespace: FALLBACK_NAMESPACE.to_string(),
            connect_timeout_secs: 10,
            timeout_secs: None,
            debounce_ms: 150,
            store_path: None,
        }
    }
}

impl Settings {
    pub fn fallback(&self) -> Fallback {
        Fallback {
            url: self.fallback_url.clone(),
            namespace: self.fallback_namespace.clone(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(crate::store::default_path)
    }
}

/// Load settings.
///
/// With an explicit `path` the file must exist. Without one, the default
/// location is used and a missing file yields [`Settings::default`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path(), false),
    };

    if !required && !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("luapad")
        .join("config.toml")
}
