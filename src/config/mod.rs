// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! notification preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[notifications]` - Auto-dismiss delay and toast id prefix
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a base directory to `load_with_override()`/`save_with_override()`
//! 3. Set `MIRA_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use mira_toasts::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.notifications.dismiss_delay_ms = Some(6000);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::notifications::DismissDelay;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "Mira";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MIRA_CONFIG_DIR";

/// Warning returned by [`load`] when an existing file cannot be used.
pub const LOAD_ERROR_WARNING: &str = "notification-config-load-error";

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Delay before a toast dismisses itself, in milliseconds.
    #[serde(
        default = "default_dismiss_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub dismiss_delay_ms: Option<u64>,

    /// Prefix for generated toast ids.
    #[serde(default = "default_id_prefix", skip_serializing_if = "Option::is_none")]
    pub id_prefix: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_delay_ms: default_dismiss_delay_ms(),
            id_prefix: default_id_prefix(),
        }
    }
}

impl NotificationConfig {
    /// Returns the configured delay, clamped to the supported range.
    #[must_use]
    pub fn dismiss_delay(&self) -> DismissDelay {
        self.dismiss_delay_ms
            .map(DismissDelay::from_millis)
            .unwrap_or_default()
    }

    /// Returns the configured id prefix, falling back to the default when unset or blank.
    #[must_use]
    pub fn id_prefix(&self) -> &str {
        self.id_prefix
            .as_deref()
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(DEFAULT_ID_PREFIX)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[allow(clippy::unnecessary_wraps)]
fn default_dismiss_delay_ms() -> Option<u64> {
    Some(DEFAULT_DISMISS_DELAY_MS)
}

#[allow(clippy::unnecessary_wraps)]
fn default_id_prefix() -> Option<String> {
    Some(DEFAULT_ID_PREFIX.to_string())
}

// =============================================================================
// Path Resolution
// =============================================================================

/// Returns the config directory, honoring the override and environment.
fn get_config_dir_with_override(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_dir {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    get_config_dir_with_override(override_dir).map(|dir| dir.join(CONFIG_FILE))
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(LOAD_ERROR_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
