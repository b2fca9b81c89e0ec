//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/envedit/envedit.toml` or an explicit `--config` path
//! 3. Environment variables: `ENVEDIT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub user_store: Option<PathBuf>,
    pub system_store: Option<PathBuf>,
}

/// Unified configuration for envedit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// File backing the user scope (default: <data dir>/envedit/user.toml)
    pub user_store: PathBuf,
    /// File backing the system scope (default: /etc/envedit/system.toml)
    pub system_store: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_store: default_user_store(),
            system_store: PathBuf::from("/etc/envedit/system.toml"),
        }
    }
}

fn default_user_store() -> PathBuf {
    ProjectDirs::from("", "", "envedit")
        .map(|dirs| dirs.data_dir().join("user.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.envedit/user.toml"))
}

/// Get the XDG config directory for envedit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "envedit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("envedit.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path fields.
    fn expand_paths(&mut self) {
        self.user_store = PathBuf::from(expand_env_vars(&self.user_store.to_string_lossy()));
        self.system_store = PathBuf::from(expand_env_vars(&self.system_store.to_string_lossy()));
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            user_store: overlay
                .user_store
                .clone()
                .unwrap_or_else(|| self.user_store.clone()),
            system_store: overlay
                .system_store
                .clone()
                .unwrap_or_else(|| self.system_store.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_path` - Explicit config file; must exist. When `None` the global
    ///   config file is used if present.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        let file = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            debug!("load: reading config {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path fields
        current.expand_paths();

        Ok(current)
    }

    /// Apply ENVEDIT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ENVEDIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("user_store") {
            settings.user_store = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("system_store") {
            settings.system_store = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a commented template config file.
    pub fn template() -> String {
        r#"# envedit configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/envedit/envedit.toml  (or --config PATH)
#   Env:    ENVEDIT_USER_STORE, ENVEDIT_SYSTEM_STORE
#
# Each store is a TOML table of NAME = "value" pairs, one file per scope.
# `~` and $VAR are expanded.

# Variables edited without -s (default: <data dir>/envedit/user.toml)
# user_store = "~/.local/share/envedit/user.toml"

# Variables edited with -s or after `cd` in the REPL
# system_store = "/etc/envedit/system.toml"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
