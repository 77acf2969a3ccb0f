//! Live preview
//!
//! Watches an outline file and re-renders it after every change. Changes
//! are debounced, and any events that queued up while a render was running
//! are drained first so only the newest outline is rendered. Failures are
//! logged and the loop keeps going.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};

use super::outline_cmd::read_outline;
use super::output::Output;
use crate::domain::{lint, Buckets, Diagram, Escaping};
use crate::render::{renderer_for, DiagramRenderer};
use crate::storage::Config;

/// Starts the preview loop (or a single cycle with `once`)
pub fn run(
    output: &Output,
    config: &Config,
    file: &Path,
    target: &Path,
    escaping: Escaping,
    once: bool,
) -> Result<()> {
    let renderer = renderer_for(&config.render, target);
    output.verbose_ctx(
        "watch",
        &format!("Renderer '{}', escaping={}", renderer.name(), escaping),
    );

    cycle(output, file, target, escaping, renderer.as_ref());

    if once {
        return Ok(());
    }

    let outline = absolute(file)?;
    let watch_dir = outline
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, rx) = mpsc::channel();
    let debounce = Duration::from_millis(config.watch.debounce_millis);
    let mut debouncer = new_debouncer(debounce, tx)?;
    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", watch_dir.display()))?;

    output.event(
        "ready",
        &format!(
            "Watching {} (debounce: {}ms)",
            outline.display(),
            config.watch.debounce_millis
        ),
    );

    while let Some(changed) = next_change(output, &rx, &outline) {
        if changed {
            cycle(output, file, target, escaping, renderer.as_ref());
        }
    }

    Ok(())
}

/// Waits for the next debounced batch and drains whatever queued up behind it.
///
/// Returns whether any of those batches touched the outline, or `None` once
/// the watcher has gone away.
fn next_change(
    output: &Output,
    rx: &mpsc::Receiver<DebounceEventResult>,
    outline: &Path,
) -> Option<bool> {
    let first = match rx.recv() {
        Ok(result) => result,
        Err(e) => {
            output.event("stopped", &format!("Channel error: {}", e));
            return None;
        }
    };

    let mut changed = touches(output, first, outline);

    // Anything queued behind the first batch supersedes it
    while let Ok(result) = rx.try_recv() {
        changed |= touches(output, result, outline);
    }

    Some(changed)
}

/// Returns true if a debounced batch includes the outline file
fn touches(output: &Output, result: DebounceEventResult, outline: &Path) -> bool {
    match result {
        Ok(events) => events.iter().any(|e| same_file(&e.path, outline)),
        Err(error) => {
            output.event("error", &format!("Watch error: {:?}", error));
            false
        }
    }
}

fn same_file(event_path: &Path, outline: &Path) -> bool {
    event_path == outline
        || event_path
            .canonicalize()
            .map(|p| p == outline)
            .unwrap_or(false)
}

/// Resolves the outline path even if the file itself does not exist yet
fn absolute(file: &Path) -> Result<PathBuf> {
    if let Ok(path) = file.canonicalize() {
        return Ok(path);
    }

    let parent = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = file
        .file_name()
        .with_context(|| format!("Not a file path: {}", file.display()))?;

    let parent = parent
        .canonicalize()
        .with_context(|| format!("Directory not found: {}", parent.display()))?;
    Ok(parent.join(name))
}

/// One read, transpile, render pass; errors are logged, never returned
fn cycle(
    output: &Output,
    file: &Path,
    target: &Path,
    escaping: Escaping,
    renderer: &dyn DiagramRenderer,
) {
    let text = match read_outline(Some(file)) {
        Ok(text) => text,
        Err(e) => {
            output.event("error", &format!("{:#}", e));
            return;
        }
    };

    let buckets = Buckets::from_outline(&text, escaping);
    for warning in lint(&buckets) {
        output.event("warning", &warning.to_string());
    }

    let diagram = Diagram::from_buckets(&buckets);
    match renderer.render(&diagram, target) {
        Ok(()) => output.event(
            "rendered",
            &format!("Rendered {} line(s) to {}", buckets.len(), target.display()),
        ),
        Err(e) => output.event("error", &format!("Render failed: {}", e)),
    }
}
