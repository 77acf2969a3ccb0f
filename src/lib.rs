//! SynapseFlow - Turn labeled outlines into layered diagrams
//!
//! An outline is free text split by the headers `PROBLEM:`, `DOMAIN:`,
//! `ANALYSIS:`, `RESOURCE:` (or `SKILL:`) and `SOLUTION:`. Each content line
//! is sanitized and placed in its section's block of a Mermaid
//! `classDiagram`, and the blocks are chained bottom-up from Problem to
//! Solution.
//!
//! ```
//! use synapse_flow::domain::transpile;
//!
//! let diagram = transpile("PROBLEM:\nlate MVP\nSOLUTION:\nship less");
//! assert!(diagram.contains("class Step1_Problem {\n      late MVP\n    }"));
//! ```

pub mod domain;
pub mod storage;
pub mod render;
pub mod cli;

pub use domain::{transpile, transpile_with, Buckets, Diagram, Escaping, Section};
