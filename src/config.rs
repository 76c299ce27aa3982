//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/daidetree/daidetree.toml`
//! 3. Local config: `<project_dir>/.daidetree.toml`
//! 4. Environment variables: `DAIDETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Scoring behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Compare structure only in the F-score (powers → POWER, provinces → PROVINCE)
    pub abstract_names: bool,
}

/// Terminal output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for printed scores
    pub precision: usize,
    /// Annotate rendered trees with node signatures
    pub show_signatures: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            show_signatures: false,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub scoring: RawScoringConfig,
    pub display: RawDisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawScoringConfig {
    pub abstract_names: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub precision: Option<usize>,
    pub show_signatures: Option<bool>,
}

/// Unified configuration for daidetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub scoring: ScoringConfig,
    pub display: DisplayConfig,
}

/// Get the XDG config directory for daidetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "daidetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("daidetree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".daidetree.toml")
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
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            scoring: ScoringConfig {
                abstract_names: overlay
                    .scoring
                    .abstract_names
                    .unwrap_or(self.scoring.abstract_names),
            },
            display: DisplayConfig {
                precision: overlay.display.precision.unwrap_or(self.display.precision),
                show_signatures: overlay
                    .display
                    .show_signatures
                    .unwrap_or(self.display.show_signatures),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.daidetree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/daidetree/daidetree.toml`
    /// 3. Local config: `<project_dir>/.daidetree.toml`
    /// 4. Environment variables: `DAIDETREE_*` prefix, `__` between section and key
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply DAIDETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DAIDETREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("scoring.abstract_names") {
            settings.scoring.abstract_names = val;
        }
        if let Ok(val) = config.get_int("display.precision") {
            settings.display.precision = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("display.precision must not be negative: {}", val),
            })?;
        }
        if let Ok(val) = config.get_bool("display.show_signatures") {
            settings.display.show_signatures = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# daidetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/daidetree/daidetree.toml
#   Local:  <project_dir>/.daidetree.toml
#   Env:    DAIDETREE_* environment variables, e.g. DAIDETREE_SCORING__ABSTRACT_NAMES=true

[scoring]
# Compare structure only in the F-score: powers become POWER, provinces PROVINCE
# abstract_names = false

[display]
# Decimal places for printed scores
# precision = 4

# Annotate rendered trees with the signature used for sorting
# show_signatures = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
