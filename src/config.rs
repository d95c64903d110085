//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dualtree/dualtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `DUALTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{PathResolver, TreeMode, DEFAULT_SEPARATOR};

/// Unified configuration for dualtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Separator between indices of a general path (default: "-")
    pub path_separator: String,
    /// Mode used by `insert` when neither `--general` nor `--binary` is given
    pub default_mode: TreeMode,
    /// Deepest level printed by `show` (default: unlimited)
    pub max_depth: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_SEPARATOR.to_string(),
            default_mode: TreeMode::Binary,
            max_depth: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub path_separator: Option<String>,
    pub default_mode: Option<TreeMode>,
    pub max_depth: Option<usize>,
}

/// Get the XDG config directory for dualtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dualtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dualtree.toml"))
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            path_separator: overlay
                .path_separator
                .clone()
                .unwrap_or_else(|| self.path_separator.clone()),
            default_mode: overlay.default_mode.unwrap_or(self.default_mode),
            max_depth: overlay.max_depth.or(self.max_depth),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config (optional)
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file (required when given)
        if let Some(path) = config_file {
            debug!("loading config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, Self::environment())?;

        current.validate()?;
        Ok(current)
    }

    /// Environment source for `DUALTREE_*` variables.
    pub fn environment() -> Environment {
        Environment::with_prefix("DUALTREE")
            .prefix_separator("_")
            .separator("__")
    }

    /// Apply environment variables as explicit overrides.
    pub fn apply_env_overrides(
        mut settings: Self,
        environment: Environment,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(environment)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("path_separator") {
            settings.path_separator = val;
        }
        if let Ok(val) = config.get_string("default_mode") {
            settings.default_mode = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("max_depth") {
            settings.max_depth = Some(val.parse().map_err(|_| ApplicationError::Config {
                message: format!("max_depth must be a non-negative integer, got '{val}'"),
            })?);
        }

        Ok(settings)
    }

    /// Reject separators that would make general paths ambiguous.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.path_separator.is_empty() {
            return Err(ApplicationError::Config {
                message: "path_separator cannot be empty".to_string(),
            });
        }
        if self.path_separator.chars().any(|c| c.is_ascii_digit()) {
            return Err(ApplicationError::Config {
                message: format!(
                    "path_separator '{}' cannot contain digits",
                    self.path_separator
                ),
            });
        }
        Ok(())
    }

    /// Path resolver using the configured separator.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.path_separator.clone())
    }
}
