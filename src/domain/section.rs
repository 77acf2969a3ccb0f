//! Outline sections
//!
//! An outline is split into five fixed sections. Their order is the order
//! of reasoning: a problem is placed in a domain, analyzed, matched with
//! resources, and finally answered by a solution.

use serde::{Deserialize, Serialize};

/// One of the five fixed outline sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// What is going wrong (default for lines before any header)
    #[default]
    Problem,

    /// Where the problem lives
    Domain,

    /// Weighted breakdown of the problem
    Analysis,

    /// Skills and components available
    Resource,

    /// The proposed answer
    Solution,
}

impl Section {
    /// Number of sections
    pub const COUNT: usize = 5;

    /// Returns all sections in declaration order
    pub fn all() -> &'static [Section; Section::COUNT] {
        &[
            Section::Problem,
            Section::Domain,
            Section::Analysis,
            Section::Resource,
            Section::Solution,
        ]
    }

    /// Position of this section in declaration order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header prefixes that switch the outline into this section.
    ///
    /// The first entry is the canonical header written by `synapse sample`.
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Section::Problem => &["PROBLEM:"],
            Section::Domain => &["DOMAIN:"],
            Section::Analysis => &["ANALYSIS:"],
            Section::Resource => &["RESOURCE:", "SKILL:"],
            Section::Solution => &["SOLUTION:"],
        }
    }

    /// Block label used in the diagram definition
    pub fn label(self) -> &'static str {
        match self {
            Section::Problem => "Step1_Problem",
            Section::Domain => "Step2_Domain",
            Section::Analysis => "Step3_Analysis_Detail",
            Section::Resource => "Step4_Resource_Component",
            Section::Solution => "Step5_Solution",
        }
    }

    /// Matches a trimmed line against the header prefixes.
    ///
    /// Matching is case-sensitive and prefix-based, so `SKILL: React`
    /// is a header while `skill: React` is content.
    pub fn from_header(line: &str) -> Option<Section> {
        Section::all()
            .iter()
            .copied()
            .find(|section| section.headers().iter().any(|h| line.starts_with(h)))
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Problem => write!(f, "problem"),
            Section::Domain => write!(f, "domain"),
            Section::Analysis => write!(f, "analysis"),
            Section::Resource => write!(f, "resource"),
            Section::Solution => write!(f, "solution"),
        }
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "problem" => Ok(Section::Problem),
            "domain" => Ok(Section::Domain),
            "analysis" => Ok(Section::Analysis),
            "resource" | "skill" => Ok(Section::Resource),
            "solution" => Ok(Section::Solution),
            _ => Err(format!("Unknown section: {}", s)),
        }
    }
}
