//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{outline_cmd, roster_cmd, watch};
use crate::domain::{Escaping, SAMPLE_OUTLINE};
use crate::storage::{Config, Workspace};

#[derive(Parser)]
#[command(name = "synapse")]
#[command(author, version, about = "Turn labeled outlines into layered Mermaid diagrams")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Use this config file instead of synapse.toml lookup
    #[arg(long, global = true, env = "SYNAPSE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transpile an outline into a diagram definition
    Transpile {
        /// Outline file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Write the definition here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Escape every Mermaid-reserved character, not just ':' and '()'
        #[arg(long)]
        strict: bool,
    },

    /// Show which lines landed in which section
    Sections {
        /// Outline file (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Escape every Mermaid-reserved character, not just ':' and '()'
        #[arg(long)]
        strict: bool,
    },

    /// Render an outline once through the configured renderer
    Render {
        /// Outline file
        file: PathBuf,

        /// Target file (.mmd writes the definition, other extensions run the engine)
        #[arg(long, short)]
        out: PathBuf,

        /// Escape every Mermaid-reserved character, not just ':' and '()'
        #[arg(long)]
        strict: bool,
    },

    /// Re-render an outline every time it changes
    Watch {
        /// Outline file
        file: PathBuf,

        /// Target file (.mmd writes the definition, other extensions run the engine)
        #[arg(long, short)]
        out: PathBuf,

        /// Render once and exit
        #[arg(long)]
        once: bool,

        /// Escape every Mermaid-reserved character, not just ':' and '()'
        #[arg(long)]
        strict: bool,
    },

    /// Print the demo outline
    Sample,

    /// Create synapse.toml and a starter outline
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print an employee roster as a table
    Roster {
        /// Roster file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("SynapseFlow starting");

    let explicit = cli.config.as_deref();

    match cli.command {
        Commands::Transpile { file, out, strict } => {
            let config = load_config(&output, explicit)?;
            let escaping = effective_escaping(&config, strict);
            outline_cmd::transpile(&output, file.as_deref(), out.as_deref(), escaping)?
        }

        Commands::Sections { file, strict } => {
            let config = load_config(&output, explicit)?;
            let escaping = effective_escaping(&config, strict);
            outline_cmd::sections(&output, file.as_deref(), escaping)?
        }

        Commands::Render { file, out, strict } => {
            let config = load_config(&output, explicit)?;
            let escaping = effective_escaping(&config, strict);
            outline_cmd::render(&output, &config, &file, &out, escaping)?
        }

        Commands::Watch { file, out, once, strict } => {
            let config = load_config(&output, explicit)?;
            let escaping = effective_escaping(&config, strict);
            watch::run(&output, &config, &file, &out, escaping, once)?
        }

        Commands::Sample => print!("{}", SAMPLE_OUTLINE),

        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing workspace at: {}", path.display()));
            let (workspace, created) = Workspace::init(&path)?;

            if output.is_json() {
                let files: Vec<_> = created.iter().map(|p| p.display().to_string()).collect();
                output.data(&serde_json::json!({
                    "root": workspace.root().display().to_string(),
                    "created": files,
                }));
            } else if created.is_empty() {
                output.success(&format!(
                    "Workspace already initialized at {}",
                    workspace.root().display()
                ));
            } else {
                for path in &created {
                    println!("Created {}", path.display());
                }
                output.success(&format!(
                    "Initialized synapse workspace at {}",
                    workspace.root().display()
                ));
            }
        }

        Commands::Roster { file } => roster_cmd::show(&output, &file)?,

        Commands::Config => {
            let config = load_config(&output, explicit)?;
            show_config(&output, &config, explicit)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Loads the config for commands that use it; `sample`, `init` and `roster` never do
fn load_config(output: &Output, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            output.verbose_ctx("config", &format!("Loading {}", path.display()));
            Config::load_file(path)
        }
        None => Config::load(),
    }
}

/// The `--strict` flag wins over the configured escaping
fn effective_escaping(config: &Config, strict: bool) -> Escaping {
    if strict {
        Escaping::Strict
    } else {
        config.transpile.escaping
    }
}

/// Prints the effective configuration and where it came from
fn show_config(output: &Output, config: &Config, explicit: Option<&Path>) -> Result<()> {
    let source = explicit
        .map(|p| p.to_path_buf())
        .or_else(Config::find_project_config)
        .map(|p| p.display().to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "source": source,
            "config": config,
        }));
    } else {
        match source {
            Some(path) => println!("# Loaded from {}", path),
            None => println!("# No synapse.toml found, using defaults"),
        }
        print!("{}", config.to_toml()?);
    }

    Ok(())
}
