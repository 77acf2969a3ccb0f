//! External engine renderer
//!
//! Writes the definition next to the target, runs the configured command
//! with `{input}` and `{output}` substituted, then removes the definition.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::writer::write_atomic;
use super::{DiagramRenderer, RenderError};
use crate::domain::Diagram;
use crate::storage::{RenderConfig, INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER};

/// Runs an external rendering engine such as mermaid-cli
pub struct CommandRenderer {
    command: String,
    args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Arguments with placeholders replaced
    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.display().to_string();
        let output = output.display().to_string();

        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

/// Where the intermediate definition for a target is written
fn definition_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".synapse.mmd");
    target.with_file_name(name)
}

impl DiagramRenderer for CommandRenderer {
    fn name(&self) -> &str {
        &self.command
    }

    fn render(&self, diagram: &Diagram, target: &Path) -> Result<(), RenderError> {
        let input = definition_path(target);
        write_atomic(&input, diagram.as_str()).map_err(|source| RenderError::Write {
            path: input.clone(),
            source,
        })?;

        let result = Command::new(&self.command)
            .args(self.expand_args(&input, target))
            .output();

        // The definition is only an intermediate; a leftover is harmless
        let _ = fs::remove_file(&input);

        let output = result.map_err(|source| RenderError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(RenderError::Engine {
                command: self.command.clone(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
