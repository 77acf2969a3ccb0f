//! Roster command

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::domain::{format_usd, Roster};

/// Prints an employee roster as a table
pub fn show(output: &Output, file: &Path) -> Result<()> {
    let roster = Roster::load(file)?;
    output.verbose_ctx(
        "roster",
        &format!("Loaded {} employee(s) from {}", roster.len(), file.display()),
    );

    if output.is_json() {
        let rows: Vec<_> = roster
            .numbered()
            .map(|(id, e)| {
                serde_json::json!({
                    "id": id,
                    "name": e.full_name(),
                    "first_name": e.first_name,
                    "last_name": e.last_name,
                    "email": e.email,
                    "salary": e.salary,
                    "salary_display": format_usd(e.salary),
                    "date": e.date,
                    "job": e.job,
                    "department": e.department,
                    "avatar": e.avatar,
                })
            })
            .collect();
        output.data(&rows);
    } else {
        print!("{}", roster.to_table());
    }

    Ok(())
}
