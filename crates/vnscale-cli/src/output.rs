//! Output rendering: tables for humans, JSON for scripts.

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a list of items as a table or a JSON array.
pub fn render_list<T, R>(
    format: OutputFormat,
    items: &[T],
    row: impl Fn(&T) -> R,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                return Ok("(none)".into());
            }
            let rows: Vec<R> = items.iter().map(row).collect();
            Ok(Table::new(rows).with(Style::sharp()).to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
    }
}

/// Render a single serializable value as JSON (used for reports).
pub fn render_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print rendered output; `--quiet` suppresses it.
pub fn print_output(out: &str, quiet: bool) {
    if !quiet {
        println!("{out}");
    }
}
