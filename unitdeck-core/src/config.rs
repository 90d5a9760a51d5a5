use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "UNITDECK_CONFIG";

/// File names searched in the working directory
pub const CONFIG_NAMES: &[&str] = &[
    "unitdeck.yml",
    "unitdeck.yaml",
    ".unitdeck.yml",
    ".unitdeck.yaml",
];

/// Color palette for the TUI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    HighContrast,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log file; nothing is logged when unset
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Default filter directive, overridden by UNITDECK_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

/// Root configuration file structure
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnitdeckConfig {
    /// Service manager executable
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Arguments for the unit listing call
    #[serde(default = "default_list_args")]
    pub list_args: Vec<String>,

    #[serde(default)]
    pub theme: ThemeName,

    #[serde(default)]
    pub log: LogConfig,

    /// Input poll interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tool() -> String {
    "systemctl".into()
}

fn default_list_args() -> Vec<String> {
    ["list-units", "--all", "--no-legend", "--plain"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_tick_ms() -> u64 {
    50
}

impl Default for UnitdeckConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            list_args: default_list_args(),
            theme: ThemeName::default(),
            log: LogConfig::default(),
            tick_ms: default_tick_ms(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl UnitdeckConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: UnitdeckConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Find a config file: `env_path` first, then the names in `dir`.
    ///
    /// Returns `Ok(None)` when nothing is found.
    pub fn discover(
        dir: &Path,
        env_path: Option<PathBuf>,
    ) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        if let Some(path) = env_path {
            let config = Self::load(&path)?;
            return Ok(Some((path, config)));
        }

        for name in CONFIG_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                let config = Self::load(&path)?;
                return Ok(Some((path, config)));
            }
        }

        Ok(None)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "tool",
                reason: "must not be empty".into(),
            });
        }
        if self.list_args.is_empty() {
            return Err(ConfigError::Invalid {
                field: "list_args",
                reason: "must contain at least the listing command".into(),
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_ms",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
