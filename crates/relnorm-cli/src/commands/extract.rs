//! Extract command - factor a column's distinct values into a dimension.

use std::path::PathBuf;

use colored::Colorize;
use relnorm::{Value, extract};

use super::{CommandResult, emit, load_table};
use crate::cli::FormatChoice;

const PREVIEW_ROWS: usize = 10;

pub fn run(
    file: PathBuf,
    column: String,
    name: Option<String>,
    drop_missing: bool,
    output: Option<PathBuf>,
    format: FormatChoice,
    verbose: bool,
) -> CommandResult {
    let table = load_table(&file)?;
    let mut values = table.column(&column)?.values;
    if drop_missing {
        values.retain(|v| !v.is_null());
    }

    let output_name = name.unwrap_or_else(|| column.clone());
    let dimension = extract(&values, &output_name);

    eprintln!(
        "{} '{}': {} distinct values",
        "Extracted".cyan().bold(),
        column,
        dimension.len().to_string().white().bold()
    );
    if verbose {
        for (key, value) in dimension.iter().take(PREVIEW_ROWS) {
            eprintln!("  {} {} = {}", "•".dimmed(), key, value);
        }
        if dimension.len() > PREVIEW_ROWS {
            eprintln!("  {} ... {} more", "•".dimmed(), dimension.len() - PREVIEW_ROWS);
        }
    }
    if !drop_missing && dimension.id_of(&Value::Null).is_some() {
        eprintln!(
            "{} missing values were given a key; pass --drop-missing to skip them",
            "Note:".yellow()
        );
    }

    emit(&dimension.to_table()?, output, format)
}
