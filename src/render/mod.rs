//! # Rendering Adapter
//!
//! Hands a finished [`Diagram`] to whatever turns it into a picture. The
//! transpiler never depends on this module.
//!
//! | Target extension | Renderer | Effect |
//! |------------------|----------|--------|
//! | `.mmd`, `.mermaid` | [`DefinitionWriter`] | Writes the definition text |
//! | anything else | [`CommandRenderer`] | Runs the configured engine (default `mmdc`) |

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Diagram;
use crate::storage::RenderConfig;

mod command;
mod writer;

pub use command::CommandRenderer;
pub use writer::{write_atomic, DefinitionWriter};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to start renderer '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Renderer '{command}' failed ({}): {stderr}", status_text(.status))]
    Engine {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Something that can turn a diagram definition into an output file
pub trait DiagramRenderer {
    /// Short name for log lines
    fn name(&self) -> &str;

    /// Renders the diagram to the target path
    fn render(&self, diagram: &Diagram, target: &Path) -> Result<(), RenderError>;
}

/// Returns true if the target should receive the definition text itself
pub fn is_definition_target(target: &Path) -> bool {
    target
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mmd") || e.eq_ignore_ascii_case("mermaid"))
}

/// Picks the renderer for a target path
pub fn renderer_for(config: &RenderConfig, target: &Path) -> Box<dyn DiagramRenderer> {
    if is_definition_target(target) {
        Box::new(DefinitionWriter)
    } else {
        Box::new(CommandRenderer::from_config(config))
    }
}
