//! Clean command - strip annotations from free-text columns.

use std::path::PathBuf;

use colored::Colorize;
use relnorm::{Column, transform::clean};

use super::{CommandResult, emit, load_table};
use crate::cli::FormatChoice;

pub fn run(
    file: PathBuf,
    columns: Vec<String>,
    output: Option<PathBuf>,
    format: FormatChoice,
    verbose: bool,
) -> CommandResult {
    let mut table = load_table(&file)?;

    eprintln!(
        "{} {} column(s) in {}",
        "Cleaning".cyan().bold(),
        columns.len(),
        file.display()
    );

    for name in &columns {
        let before = table.column(name)?;
        let cleaned = clean(&before.values);
        if verbose {
            let changed = before
                .values
                .iter()
                .zip(&cleaned)
                .filter(|(a, b)| a != b)
                .count();
            eprintln!("  {} '{}': {} values changed", "•".dimmed(), name, changed);
        }
        table = table.with_column(Column::new(name.as_str(), cleaned))?;
    }

    emit(&table, output, format)
}
