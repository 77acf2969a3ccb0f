//! Employee roster
//!
//! A caller-supplied list of employees shown as a numbered table. Rows are
//! numbered from 1 in input order and that number doubles as the row id for
//! edit and delete lookups. Persistence is the caller's concern.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse roster {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported roster format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("No employee with id {0}")]
    NotFound(usize),
}

/// A single employee row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(alias = "first_name")]
    pub first_name: String,

    #[serde(alias = "last_name")]
    pub last_name: String,

    pub email: String,

    /// Yearly salary in US dollars
    pub salary: f64,

    /// Hire date, shown verbatim
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub job: String,

    #[serde(default)]
    pub department: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Employee {
    /// First and last name joined by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Employees in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Loads a roster from a JSON or YAML file holding a list of employees
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let content = fs::read_to_string(path).map_err(|source| RosterError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let parsed = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            _ => return Err(RosterError::UnsupportedFormat(path.to_path_buf())),
        };

        parsed.map_err(|message| RosterError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Iterates rows with their 1-based ids
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Employee)> {
        self.employees.iter().enumerate().map(|(i, e)| (i + 1, e))
    }

    /// Looks up the employee behind a row id
    pub fn get(&self, id: usize) -> Result<&Employee, RosterError> {
        id.checked_sub(1)
            .and_then(|i| self.employees.get(i))
            .ok_or(RosterError::NotFound(id))
    }

    /// Removes a row; later rows are renumbered
    pub fn remove(&mut self, id: usize) -> Result<Employee, RosterError> {
        match id.checked_sub(1) {
            Some(i) if i < self.employees.len() => Ok(self.employees.remove(i)),
            _ => Err(RosterError::NotFound(id)),
        }
    }

    /// Renders the roster as an aligned text table
    pub fn to_table(&self) -> String {
        if self.is_empty() {
            return "No employees.\n".to_string();
        }

        let header = [
            "No.",
            "First Name",
            "Last Name",
            "Email",
            "Salary",
            "Date",
            "Job",
            "Department",
            "Avatar",
        ];
        let rows: Vec<[String; 9]> = self
            .numbered()
            .map(|(id, e)| {
                [
                    id.to_string(),
                    e.first_name.clone(),
                    e.last_name.clone(),
                    e.email.clone(),
                    format_usd(e.salary),
                    e.date.clone(),
                    e.job.clone(),
                    e.department.clone(),
                    e.avatar.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        let mut widths = header.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &header[..], &widths);
        let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        out.push_str(&"-".repeat(total));
        out.push('\n');
        for row in &rows {
            push_row(&mut out, &row[..], &widths);
        }
        out
    }
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let cell = cell.as_ref();
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Formats a dollar amount with US digit grouping.
///
/// Up to two fraction digits are shown and trailing zeros are dropped:
/// `1234.5` is `$1,234.5` and `60000` is `$60,000`. Amounts too large for
/// whole cents are shown in whole dollars.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let (negative, digits, cents) = if amount.abs() < MAX_CENTS_AMOUNT {
        let cents = (amount * 100.0).round() as i64;
        let abs = cents.unsigned_abs();
        (cents < 0, (abs / 100).to_string(), abs % 100)
    } else {
        (amount < 0.0, format!("{:.0}", amount.abs().trunc()), 0)
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let fraction = match cents {
        0 => String::new(),
        f if f % 10 == 0 => format!(".{}", f / 10),
        f => format!(".{:02}", f),
    };

    let sign = if negative { "-" } else { "" };
    format!("{}${}{}", sign, grouped, fraction)
}

/// Past this, `f64` has no cent precision left and cents overflow `i64`
const MAX_CENTS_AMOUNT: f64 = 1e15;
