//! Domain models for SynapseFlow
//!
//! Contains the outline transpiler and the roster table without any I/O
//! concerns beyond loading a roster file.

mod section;
mod outline;
mod diagram;
mod roster;

pub use section::Section;
pub use outline::{lint, sanitize, Buckets, Escaping, Warning, SAMPLE_OUTLINE};
pub use diagram::{relationships, transpile, transpile_with, Diagram};
pub use roster::{format_usd, Employee, Roster, RosterError};
