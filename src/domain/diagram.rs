//! Diagram definition
//!
//! Renders [`Buckets`] into a Mermaid `classDiagram`. Block labels, the
//! bottom-to-top direction and the relationship chain are fixed; only the
//! block bodies vary with the outline.

use std::fmt;

use serde::Serialize;

use super::outline::{Buckets, Escaping};
use super::section::Section;

/// Indentation of block declarations and relationships
const INDENT: &str = "    ";

/// Indentation of lines inside a block body
const BODY_INDENT: &str = "      ";

/// A complete Mermaid diagram definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagram(String);

impl Diagram {
    /// Builds the definition for classified outline lines
    ///
    /// An empty bucket renders as an empty block.
    pub fn from_buckets(buckets: &Buckets) -> Self {
        let mut out = String::new();
        out.push_str("classDiagram\n");
        out.push_str(INDENT);
        out.push_str("direction BT\n");

        for (section, lines) in buckets.iter() {
            out.push('\n');
            out.push_str(&format!("{INDENT}class {} {{\n", section.label()));
            for line in lines {
                out.push_str(BODY_INDENT);
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(INDENT);
            out.push_str("}\n");
        }

        out.push('\n');
        for (from, to) in relationships() {
            out.push_str(&format!("{INDENT}{} <-- {}\n", from.label(), to.label()));
        }

        Self(out)
    }

    /// Returns the definition text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Diagram {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed relationship chain, last section first.
///
/// Each pair reads `later <-- earlier`; with `direction BT` this stacks
/// Problem on top and Solution at the bottom.
pub fn relationships() -> impl Iterator<Item = (Section, Section)> {
    let all = Section::all();
    (1..Section::COUNT)
        .rev()
        .map(move |i| (all[i], all[i - 1]))
}

/// Transpiles an outline with basic escaping
pub fn transpile(text: &str) -> String {
    transpile_with(text, Escaping::Basic).into_string()
}

/// Transpiles an outline with the given escaping
pub fn transpile_with(text: &str, escaping: Escaping) -> Diagram {
    Diagram::from_buckets(&Buckets::from_outline(text, escaping))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: &str = "classDiagram
    direction BT

    class Step1_Problem {
    }

    class Step2_Domain {
    }

    class Step3_Analysis_Detail {
    }

    class Step4_Resource_Component {
    }

    class Step5_Solution {
    }

    Step5_Solution <-- Step4_Resource_Component
    Step4_Resource_Component <-- Step3_Analysis_Detail
    Step3_Analysis_Detail <-- Step2_Domain
    Step2_Domain <-- Step1_Problem
";

    #[test]
    fn empty_outline_keeps_the_skeleton() {
        assert_eq!(transpile(""), EMPTY);
    }

    #[test]
    fn relationship_chain_runs_last_to_first() {
        let pairs: Vec<_> = relationships().collect();
        assert_eq!(
            pairs,
            vec![
                (Section::Solution, Section::Resource),
                (Section::Resource, Section::Analysis),
                (Section::Analysis, Section::Domain),
                (Section::Domain, Section::Problem),
            ]
        );
    }

    #[test]
    fn bucket_lines_become_block_body() {
        let diagram = transpile("PROBLEM:\nlate MVP\nRESOURCE:\n(Skill): React\n(Skill): Spring");

        assert!(diagram.contains("    class Step1_Problem {\n      late MVP\n    }\n"));
        assert!(diagram.contains(
            "    class Step4_Resource_Component {\n      [Skill]= React\n      [Skill]= Spring\n    }\n"
        ));
    }

    #[test]
    fn header_text_is_not_rendered() {
        let diagram = transpile("PROBLEM:\nA\nDOMAIN:\nB");
        assert!(!diagram.contains("PROBLEM"));
        assert!(!diagram.contains("DOMAIN:"));
    }

    #[test]
    fn strict_escaping_reaches_the_diagram() {
        let diagram = transpile_with("map {a}", Escaping::Strict);
        assert!(diagram.as_str().contains("      map [a]\n"));
    }

    #[test]
    fn diagram_serializes_as_string() {
        let diagram = transpile_with("", Escaping::Basic);
        let json = serde_json::to_value(&diagram).unwrap();
        assert_eq!(json, serde_json::Value::String(EMPTY.to_string()));
    }
}
