//! CLI command implementations.

pub mod clean;
pub mod extract;
pub mod map;
pub mod normalize;
pub mod unpack;

use std::path::{Path, PathBuf};

use colored::Colorize;
use relnorm::{DataTable, Parser, TableWriter};

use crate::cli::FormatChoice;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Load a data file, failing early with a readable message if it is absent.
pub(crate) fn load_table(file: &Path) -> Result<DataTable, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(Parser::new().parse_file(file)?)
}

/// Write a single result table to `output`, or to stdout when absent.
///
/// Status lines go to stderr so stdout stays pipeable.
pub(crate) fn emit(
    table: &DataTable,
    output: Option<PathBuf>,
    format: FormatChoice,
) -> CommandResult {
    let writer = TableWriter::new(format.into());
    match output {
        Some(path) => {
            writer.write_file(table, &path)?;
            eprintln!(
                "{} {} rows to {}",
                "Wrote".green().bold(),
                table.row_count(),
                path.display().to_string().cyan()
            );
        }
        None => {
            let stdout = std::io::stdout();
            writer.write(table, stdout.lock())?;
        }
    }
    Ok(())
}
