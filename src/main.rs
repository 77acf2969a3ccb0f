//! SynapseFlow CLI - Outlines to layered diagrams

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = synapse_flow::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
