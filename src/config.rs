//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeshape/treeshape.toml`
//! 3. Local config: `<project_dir>/.treeshape.toml`
//! 4. Environment variables: `TREESHAPE_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// How the smart transform is applied to a document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Smart-transform the root node
    #[default]
    Whole,
    /// Smart-transform each element of every top-level sequence
    Grouped,
}

/// Report presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented plain text
    #[default]
    Text,
    /// Box-drawing tree
    Tree,
}

impl FromStr for TransformMode {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| ApplicationError::Config {
            message: format!("unknown transform mode: {s}"),
        })
    }
}

impl FromStr for OutputFormat {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| ApplicationError::Config {
            message: format!("unknown output format: {s}"),
        })
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent_width: Option<usize>,
    pub mode: Option<TransformMode>,
    pub format: Option<OutputFormat>,
}

/// Unified configuration for treeshape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Spaces per depth level in text reports (default: 2)
    pub indent_width: usize,
    /// Transform mode (default: whole)
    pub mode: TransformMode,
    /// Report format (default: text)
    pub format: OutputFormat,
}

/// Widest accepted `indent_width`.
pub const MAX_INDENT_WIDTH: usize = 16;

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent_width: 2,
            mode: TransformMode::default(),
            format: OutputFormat::default(),
        }
    }
}

/// Get the XDG config directory for treeshape.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeshape").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeshape.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".treeshape.toml")
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
    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent_width: overlay.indent_width.unwrap_or(self.indent_width),
            mode: overlay.mode.unwrap_or(self.mode),
            format: overlay.format.unwrap_or(self.format),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.treeshape.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current, None)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply TREESHAPE_* environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment when given.
    fn apply_env_overrides(
        mut settings: Self,
        source: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREESHAPE").source(source))
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_int("indent_width"))? {
            settings.indent_width = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("indent_width must not be negative: {val}"),
            })?;
        }
        if let Some(val) = env_value(config.get_string("mode"))? {
            settings.mode = val.parse()?;
        }
        if let Some(val) = env_value(config.get_string("format"))? {
            settings.format = val.parse()?;
        }

        Ok(settings)
    }

    /// Reject settings the renderer cannot honor.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if !(1..=MAX_INDENT_WIDTH).contains(&self.indent_width) {
            return Err(ApplicationError::Config {
                message: format!(
                    "indent_width must be between 1 and {MAX_INDENT_WIDTH}, got {}",
                    self.indent_width
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treeshape configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treeshape/treeshape.toml
#   Local:  <project_dir>/.treeshape.toml
#   Env:    TREESHAPE_* environment variables (explicit overrides)

# Spaces per depth level in text reports
# indent_width = 2

# "whole": smart-transform the document root
# "grouped": smart-transform each element of every top-level list
# mode = "whole"

# "text" or "tree"
# format = "text"
"#
        .to_string()
    }
}

/// An unset variable is `None`; a malformed one is an error.
fn env_value<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
