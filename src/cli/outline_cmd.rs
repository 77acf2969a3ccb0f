//! Outline commands (transpile, sections, render)

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{lint, Buckets, Diagram, Escaping, Warning};
use crate::render::{renderer_for, write_atomic};
use crate::storage::Config;

/// Reads an outline from a file, or from stdin for `None` and `-`
pub fn read_outline(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read outline: {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read outline from stdin")?;
            Ok(text)
        }
    }
}

/// Prints lint warnings in text mode
fn report_warnings(output: &Output, warnings: &[Warning]) {
    for warning in warnings {
        output.warning(&warning.to_string());
    }
    if !warnings.is_empty() {
        output.warning("the renderer may reject these lines; try --strict");
    }
}

/// Transpiles an outline to stdout or a file
pub fn transpile(
    output: &Output,
    file: Option<&Path>,
    out: Option<&Path>,
    escaping: Escaping,
) -> Result<()> {
    let text = read_outline(file)?;
    let buckets = Buckets::from_outline(&text, escaping);
    output.verbose_ctx(
        "transpile",
        &format!("Classified {} line(s), escaping={}", buckets.len(), escaping),
    );

    let warnings = lint(&buckets);
    let diagram = Diagram::from_buckets(&buckets);

    if let Some(path) = out {
        write_atomic(path, diagram.as_str())
            .with_context(|| format!("Failed to write diagram: {}", path.display()))?;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "sections": buckets,
            "diagram": diagram,
            "warnings": warnings,
            "out": out.map(|p| p.display().to_string()),
        }));
        return Ok(());
    }

    report_warnings(output, &warnings);
    match out {
        Some(path) => output.success(&format!("Wrote diagram to {}", path.display())),
        None => print!("{}", diagram),
    }

    Ok(())
}

/// Shows the bucket assignment per section
pub fn sections(output: &Output, file: Option<&Path>, escaping: Escaping) -> Result<()> {
    let text = read_outline(file)?;
    let buckets = Buckets::from_outline(&text, escaping);
    let warnings = lint(&buckets);

    if output.is_json() {
        output.data(&serde_json::json!({
            "sections": buckets,
            "warnings": warnings,
        }));
        return Ok(());
    }

    for (section, lines) in buckets.iter() {
        println!("{} ({})", section.to_string().to_uppercase(), lines.len());
        for line in lines {
            println!("  {}", line);
        }
    }
    report_warnings(output, &warnings);

    Ok(())
}

/// Renders an outline once; engine failures become the command's error
pub fn render(
    output: &Output,
    config: &Config,
    file: &Path,
    target: &Path,
    escaping: Escaping,
) -> Result<()> {
    let text = read_outline(Some(file))?;
    let buckets = Buckets::from_outline(&text, escaping);
    let warnings = lint(&buckets);
    let diagram = Diagram::from_buckets(&buckets);

    let renderer = renderer_for(&config.render, target);
    output.verbose_ctx(
        "render",
        &format!("Rendering {} with '{}'", target.display(), renderer.name()),
    );

    renderer
        .render(&diagram, target)
        .with_context(|| format!("Failed to render {}", file.display()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "rendered": target.display().to_string(),
            "renderer": renderer.name(),
            "warnings": warnings,
        }));
    } else {
        report_warnings(output, &warnings);
        output.success(&format!(
            "Rendered {} to {}",
            file.display(),
            target.display()
        ));
    }

    Ok(())
}
