//! Outline classification
//!
//! A single pass over the outline assigns every non-blank, non-header line
//! to the section whose header most recently preceded it. Lines before the
//! first header belong to [`Section::Problem`]. Every assigned line is
//! sanitized so it cannot break the class-body syntax of the diagram.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::section::Section;

/// Demo outline written by `synapse init` and `synapse sample`
pub const SAMPLE_OUTLINE: &str = "PROBLEM:
The MVP launch keeps slipping

DOMAIN:
Business
Frontend_development

ANALYSIS:
WHO: graduate students (weight 40)
HOW: web service (weight 30)
WHEN: due March 19 (weight 30)
(Detail): March 19 is fixed by the academic calendar

RESOURCE:
(Skill): React
(Component): React-Flow library
(Skill): SpringBoot
(Component): JPA entity design

SOLUTION:
Build with React and SpringBoot
ship only the core features by March 19
and deploy fast
";

/// Which characters are rewritten before a line enters a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escaping {
    /// Colon and parentheses only
    ///
    /// Braces, quotes and angle brackets pass through unchanged and may
    /// still trip the renderer. [`lint`] reports such lines.
    #[default]
    Basic,

    /// Also rewrites every other character Mermaid treats specially
    /// inside a class body
    Strict,
}

impl Escaping {
    pub fn as_str(&self) -> &str {
        match self {
            Escaping::Basic => "basic",
            Escaping::Strict => "strict",
        }
    }

    fn replace(self, c: char) -> Option<char> {
        let basic = match c {
            ':' => Some('='),
            '(' => Some('['),
            ')' => Some(']'),
            _ => None,
        };

        match self {
            Escaping::Basic => basic,
            Escaping::Strict => basic.or(match c {
                '{' => Some('['),
                '}' => Some(']'),
                '"' | '`' => Some('\''),
                '<' => Some('‹'),
                '>' => Some('›'),
                '~' => Some('-'),
                '%' => Some('％'),
                _ => None,
            }),
        }
    }
}

impl std::fmt::Display for Escaping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Escaping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Escaping::Basic),
            "strict" => Ok(Escaping::Strict),
            _ => Err(format!("Unknown escaping mode: {}", s)),
        }
    }
}

/// Rewrites reserved characters in a single content line.
///
/// Replacement characters are never themselves reserved, so applying this
/// twice gives the same result as applying it once.
pub fn sanitize(line: &str, escaping: Escaping) -> String {
    line.chars()
        .map(|c| escaping.replace(c).unwrap_or(c))
        .collect()
}

/// Sanitized lines grouped by section, in outline order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    lines: [Vec<String>; Section::COUNT],
}

/// Strips surrounding whitespace and a byte-order mark left by some editors
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

impl Buckets {
    /// Creates empty buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a whole outline
    pub fn from_outline(text: &str, escaping: Escaping) -> Self {
        Self::from_lines(text.lines(), escaping)
    }

    /// Classifies a sequence of raw lines
    pub fn from_lines<'a, I>(lines: I, escaping: Escaping) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut buckets = Self::new();
        let mut current = Section::default();

        for line in lines {
            let text = trim_line(line);
            if text.is_empty() {
                continue;
            }

            if let Some(section) = Section::from_header(text) {
                current = section;
                continue;
            }

            buckets.push(current, sanitize(text, escaping));
        }

        buckets
    }

    /// Appends an already sanitized line to a section
    pub fn push(&mut self, section: Section, line: String) {
        self.lines[section.index()].push(line);
    }

    /// Lines assigned to a section
    pub fn get(&self, section: Section) -> &[String] {
        &self.lines[section.index()]
    }

    /// Iterates sections in declaration order with their lines
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[String])> + '_ {
        Section::all()
            .iter()
            .map(move |&section| (section, self.get(section)))
    }

    /// Total number of assigned lines
    pub fn len(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Returns true if no line was assigned to any section
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(Vec::is_empty)
    }
}

impl Serialize for Buckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Section::COUNT))?;
        for (section, lines) in self.iter() {
            map.serialize_entry(&section, lines)?;
        }
        map.end()
    }
}

/// Characters that still reach the renderer unescaped in basic mode
const RISKY: &[&str] = &["{", "}", "\"", "`", "<", ">", "~", "%%"];

/// A bucket line that may fail to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub section: Section,
    /// Zero-based position within the section's bucket
    pub position: usize,
    pub line: String,
    /// The offending sequences, in [`RISKY`] order
    pub found: Vec<&'static str>,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} line {}: '{}' contains {}",
            self.section,
            self.position + 1,
            self.line,
            self.found.join(" ")
        )
    }
}

/// Reports bucket lines containing characters the renderer may reject
pub fn lint(buckets: &Buckets) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for (section, lines) in buckets.iter() {
        for (position, line) in lines.iter().enumerate() {
            let found: Vec<_> = RISKY.iter().copied().filter(|r| line.contains(r)).collect();
            if !found.is_empty() {
                warnings.push(Warning {
                    section,
                    position,
                    line: line.clone(),
                    found,
                });
            }
        }
    }

    warnings
}
