//! # Storage Layer
//!
//! Configuration loading and workspace files.
//!
//! ## Files
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Project config | TOML | `synapse.toml` (nearest ancestor of the working directory) |
//! | Global config | TOML | platform config dir, e.g. `~/.config/synapse/config.toml` |
//! | Starter outline | Plain text | `outline.txt` |
//!
//! ## Key Types
//!
//! - [`Config`] - Effective configuration (global layered under project)
//! - [`Workspace`] - Creates the starter files for `synapse init`

mod config;
mod workspace;

pub use config::{
    Config, ConfigError, RenderConfig, TranspileConfig, WatchConfig, CONFIG_FILE,
    INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER,
};
pub use workspace::{Workspace, OUTLINE_FILE};
