//! Workspace initialization
//!
//! A workspace is a directory holding `synapse.toml` and a starter
//! `outline.txt`. Initialization is idempotent and never overwrites files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::config::{Config, CONFIG_FILE};
use crate::domain::SAMPLE_OUTLINE;

/// Name of the starter outline file
pub const OUTLINE_FILE: &str = "outline.txt";

/// A SynapseFlow workspace directory
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Initializes a workspace, creating the directory if needed.
    ///
    /// Returns the workspace and the files that were actually written.
    pub fn init(root: impl Into<PathBuf>) -> Result<(Self, Vec<PathBuf>)> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create directory: {}", root.display()))?;

        let workspace = Self { root };
        let mut created = Vec::new();

        let config_path = workspace.config_path();
        if !config_path.exists() {
            let content = format!(
                "# SynapseFlow configuration\n\n{}",
                Config::default().to_toml()?
            );
            fs::write(&config_path, content)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
            created.push(config_path);
        }

        let outline_path = workspace.outline_path();
        if !outline_path.exists() {
            fs::write(&outline_path, SAMPLE_OUTLINE)
                .with_context(|| format!("Failed to write outline: {}", outline_path.display()))?;
            created.push(outline_path);
        }

        Ok((workspace, created))
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn outline_path(&self) -> PathBuf {
        self.root.join(OUTLINE_FILE)
    }
}
