//! Configuration handling for SynapseFlow
//!
//! Configuration is read from `synapse.toml` (found by walking up from the
//! working directory) layered over `~/.config/synapse/config.toml`
//! (global). Keys missing from both fall back to defaults. The result is
//! loaded once at startup and never mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Escaping;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "synapse.toml";

/// Placeholder replaced by the definition file path in renderer arguments
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced by the target path in renderer arguments
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Transpiler settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspileConfig {
    /// Which characters are rewritten in content lines
    pub escaping: Escaping,
}

/// External renderer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Program invoked for non-`.mmd` targets
    pub command: String,

    /// Arguments (placeholders: {input}, {output})
    pub args: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            command: "mmdc".to_string(),
            args: vec![
                "-i".to_string(),
                INPUT_PLACEHOLDER.to_string(),
                "-o".to_string(),
                OUTPUT_PLACEHOLDER.to_string(),
            ],
        }
    }
}

/// Live preview settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period after the last change before re-rendering
    pub debounce_millis: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_millis: 300,
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transpile: TranspileConfig,
    pub render: RenderConfig,
    pub watch: WatchConfig,
}

impl Config {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self> {
        let project = Self::find_project_config();
        Self::load_layered(Self::global_config_path().as_deref(), project.as_deref())
    }

    /// Loads configuration from an explicit file, ignoring the search path
    pub fn load_file(path: &Path) -> Result<Self> {
        let table = Self::read_table(path)?;
        Self::from_table(table)
    }

    /// Layers the project file over the global file; either may be absent
    pub fn load_layered(global: Option<&Path>, project: Option<&Path>) -> Result<Self> {
        let mut table = toml::Table::new();

        for path in [global, project].into_iter().flatten() {
            if path.is_file() {
                merge(&mut table, Self::read_table(path)?);
            }
        }

        Self::from_table(table)
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        Self::from_table(table)
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        let config: Config = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        content
            .parse::<toml::Table>()
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Checks values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.command.trim().is_empty() {
            return Err(ConfigError::Invalid("render.command must not be empty".to_string()));
        }

        if !self.render.args.iter().any(|a| a.contains(OUTPUT_PLACEHOLDER)) {
            return Err(ConfigError::Invalid(format!(
                "render.args must contain {}",
                OUTPUT_PLACEHOLDER
            )));
        }

        if self.watch.debounce_millis == 0 {
            return Err(ConfigError::Invalid(
                "watch.debounce_millis must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "synapse", "synapse").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Finds `synapse.toml` in the working directory or a parent
    pub fn find_project_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Serializes the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Recursively merges `overlay` into `base`; overlay wins on conflicts
fn merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
