//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/trieviz/trieviz.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TRIEVIZ_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, CountPolicy, DEFAULT_MAX_DEPTH};

/// Graphviz rank directions accepted for `rankdir`.
pub const RANKDIRS: [&str; 4] = ["TB", "LR", "BT", "RL"];

/// Unified configuration for trieviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Output image format passed to `dot -T` (default: png)
    pub format: String,
    /// Graphviz executable (default: dot)
    pub dot_command: String,
    /// Graph layout direction (default: LR)
    pub rankdir: String,
    /// Deepest trie level rendered before giving up
    pub max_depth: usize,
    /// How node counts are turned into own counts
    pub count_policy: CountPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: "png".into(),
            dot_command: "dot".into(),
            rankdir: "LR".into(),
            max_depth: DEFAULT_MAX_DEPTH,
            count_policy: CountPolicy::default(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<String>,
    pub dot_command: Option<String>,
    pub rankdir: Option<String>,
    pub max_depth: Option<usize>,
    pub count_policy: Option<CountPolicy>,
}

/// Get the XDG config directory for trieviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "trieviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("trieviz.toml"))
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
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.dot_command = expand_env_vars(&self.dot_command);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            format: overlay.format.clone().unwrap_or_else(|| self.format.clone()),
            dot_command: overlay
                .dot_command
                .clone()
                .unwrap_or_else(|| self.dot_command.clone()),
            rankdir: overlay
                .rankdir
                .clone()
                .unwrap_or_else(|| self.rankdir.clone()),
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            count_policy: overlay.count_policy.unwrap_or(self.count_policy),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply TRIEVIZ_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TRIEVIZ")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("format") {
            settings.format = val;
        }
        if let Ok(val) = config.get_string("dot_command") {
            settings.dot_command = val;
        }
        if let Ok(val) = config.get_string("rankdir") {
            settings.rankdir = val;
        }
        if let Ok(val) = config.get_string("max_depth") {
            settings.max_depth = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("TRIEVIZ_MAX_DEPTH: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("count_policy") {
            settings.count_policy = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("TRIEVIZ_COUNT_POLICY: {message}"),
            })?;
        }

        Ok(settings)
    }

    /// Reject values `dot` or the walker cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.format.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "format must not be empty".into(),
            });
        }
        if self.dot_command.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "dot_command must not be empty".into(),
            });
        }
        if !RANKDIRS.contains(&self.rankdir.as_str()) {
            return Err(ApplicationError::Config {
                message: format!(
                    "rankdir must be one of {}, got '{}'",
                    RANKDIRS.join(", "),
                    self.rankdir
                ),
            });
        }
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".into(),
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
        r#"# trieviz configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/trieviz/trieviz.toml
#   Local:  file given with --config
#   Env:    TRIEVIZ_* environment variables (e.g. TRIEVIZ_COUNT_POLICY=cumulative)

# Output image format, passed to `dot -T<format>`
# format = "png"

# Graphviz executable (~ and $VAR are expanded)
# dot_command = "dot"

# Layout direction: TB, LR, BT or RL
# rankdir = "LR"

# Deepest trie level rendered before the walk is aborted
# max_depth = 10000

# How a terminal node's own count is derived:
#   subtractive: count minus the children's counts (sequences ending exactly here)
#   cumulative:  count as stored
# count_policy = "subtractive"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
