//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treenode/treenode.toml`
//! 3. Local config: `<dir>/.treenode.toml` (directory given with `-C`, default cwd)
//! 4. Environment variables: `TREENODE_*` prefix, `__` between section and key

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// How a forest is drawn by `show`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Append `[id]` to every label
    pub show_ids: bool,
    /// Expanded/checked/lazy markers
    pub show_state: bool,
    /// Append `{name=value, ...}` for extension fields
    pub show_extensions: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_ids: false,
            show_state: true,
            show_extensions: false,
        }
    }
}

/// How documents are written by `fmt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Raw display settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplaySettings {
    pub show_ids: Option<bool>,
    pub show_state: Option<bool>,
    pub show_extensions: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputSettings {
    pub pretty: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub display: RawDisplaySettings,
    pub output: RawOutputSettings,
}

/// Unified configuration for treenode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub output: OutputSettings,
}

/// Get the XDG config directory for treenode.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treenode").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treenode.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treenode.toml")
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
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            display: DisplaySettings {
                show_ids: overlay.display.show_ids.unwrap_or(self.display.show_ids),
                show_state: overlay.display.show_state.unwrap_or(self.display.show_state),
                show_extensions: overlay
                    .display
                    .show_extensions
                    .unwrap_or(self.display.show_extensions),
            },
            output: OutputSettings {
                pretty: overlay.output.pretty.unwrap_or(self.output.pretty),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.treenode.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply TREENODE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREENODE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("display.show_ids") {
            settings.display.show_ids = val;
        }
        if let Ok(val) = config.get_bool("display.show_state") {
            settings.display.show_state = val;
        }
        if let Ok(val) = config.get_bool("display.show_extensions") {
            settings.display.show_extensions = val;
        }
        if let Ok(val) = config.get_bool("output.pretty") {
            settings.output.pretty = val;
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
        r#"# treenode configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treenode/treenode.toml
#   Local:  <dir>/.treenode.toml
#   Env:    TREENODE_<SECTION>__<KEY>, e.g. TREENODE_DISPLAY__SHOW_IDS=true

[display]
# Append [id] to each node label
# show_ids = false

# Show expanded/checked/lazy markers
# show_state = true

# Append extension fields to each node label
# show_extensions = false

[output]
# Pretty-print JSON written by `fmt`
# pretty = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_state_shown_and_ids_hidden() {
        let settings = Settings::default();
        assert!(!settings.display.show_ids);
        assert!(settings.display.show_state);
        assert!(!settings.display.show_extensions);
        assert!(settings.output.pretty);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_values_kept() {
        let overlay: RawSettings = toml::from_str("[display]\nshow_ids = true\n").unwrap();
        let merged = Settings::default().merge_with(&overlay);
        assert!(merged.display.show_ids);
        assert!(merged.display.show_state);
        assert!(merged.output.pretty);
    }

    #[test]
    fn given_template_when_parsing_then_yields_no_overrides() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }
}
