//! Map command - rewrite a column into a dimension's surrogate keys.

use std::collections::BTreeSet;
use std::path::PathBuf;

use colored::Colorize;
use relnorm::{Column, Value, map_values};

use super::{CommandResult, emit, load_table};
use crate::cli::FormatChoice;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    column: String,
    dimension: PathBuf,
    id_col: String,
    value_col: String,
    output: Option<PathBuf>,
    format: FormatChoice,
    verbose: bool,
) -> CommandResult {
    let table = load_table(&file)?;
    let dimension_table = load_table(&dimension)?;

    let values = table.column(&column)?.values;
    let keys = map_values(&values, &dimension_table, &id_col, &value_col)?;

    let missed: Vec<&Value> = values
        .iter()
        .zip(&keys)
        .filter(|(v, k)| !v.is_null() && k.is_null())
        .map(|(v, _)| v)
        .collect();
    let unmatched = missed.len();

    eprintln!(
        "{} '{}' through {} ({} values)",
        "Mapped".cyan().bold(),
        column,
        dimension.display(),
        keys.len()
    );
    if verbose {
        eprintln!(
            "  {} dimension has {} rows",
            "•".dimmed(),
            dimension_table.row_count()
        );
        let distinct: BTreeSet<&Value> = missed.into_iter().collect();
        for value in distinct {
            eprintln!("  {} not found: {}", "•".dimmed(), value);
        }
    }
    if unmatched > 0 {
        eprintln!(
            "{} {} values not found in the dimension were set to missing",
            "Warning:".yellow().bold(),
            unmatched
        );
    }

    let mapped = table.with_column(Column::new(column.as_str(), keys))?;
    emit(&mapped, output, format)
}
