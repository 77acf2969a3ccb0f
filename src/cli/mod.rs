//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Outline | One-shot conversion | `transpile`, `sections`, `render` |
//! | Preview | Live re-rendering | `watch` |
//! | Setup | Starter files | `init`, `sample`, `config` |
//! | Roster | Employee table | `roster` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! synapse --verbose transpile outline.txt
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod outline_cmd;
mod roster_cmd;
mod watch;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
