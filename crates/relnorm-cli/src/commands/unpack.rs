//! Unpack command - explode a packed column into junction rows.

use std::collections::HashSet;
use std::path::PathBuf;

use colored::Colorize;
use relnorm::{NormalizeConfig, Value, config::parse_delimiter, unpack};

use super::{CommandResult, emit, load_table};
use crate::cli::FormatChoice;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    id: String,
    column: String,
    delimiter: String,
    missing_marker: String,
    output: Option<PathBuf>,
    format: FormatChoice,
    verbose: bool,
) -> CommandResult {
    let table = load_table(&file)?;
    let config = NormalizeConfig::default()
        .with_delimiter(parse_delimiter(&delimiter)?)
        .with_missing_marker(missing_marker);
    config.validate()?;

    let junction = unpack(&table, &id, &column, &config)?;

    eprintln!(
        "{} '{}': {} rows → {} pairs",
        "Unpacked".cyan().bold(),
        column,
        table.row_count(),
        junction.len().to_string().white().bold()
    );
    if verbose {
        let ids: HashSet<&Value> = junction.rows.iter().map(|(id, _)| id).collect();
        let skipped = table
            .column(&id)?
            .values
            .iter()
            .filter(|v| v.is_null())
            .count();
        eprintln!("  {} {} distinct ids", "•".dimmed(), ids.len());
        eprintln!("  {} {} rows skipped for a missing id", "•".dimmed(), skipped);
    }
    if junction.is_empty() {
        eprintln!(
            "{} '{}' produced no values",
            "Warning:".yellow().bold(),
            column
        );
    }

    emit(&junction.to_table()?, output, format)
}
