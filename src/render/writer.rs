//! Definition writer

use std::fs;
use std::io;
use std::path::Path;

use super::{DiagramRenderer, RenderError};
use crate::domain::Diagram;

/// Writes the definition text to the target unchanged
pub struct DefinitionWriter;

impl DiagramRenderer for DefinitionWriter {
    fn name(&self) -> &str {
        "definition"
    }

    fn render(&self, diagram: &Diagram, target: &Path) -> Result<(), RenderError> {
        write_atomic(target, diagram.as_str()).map_err(|source| RenderError::Write {
            path: target.to_path_buf(),
            source,
        })
    }
}

/// Writes a file atomically (temp file + rename), creating parent directories
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)
}
