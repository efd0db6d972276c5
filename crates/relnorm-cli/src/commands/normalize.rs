//! Normalize command - run a plan and write every output table.

use std::path::PathBuf;

use colored::Colorize;
use relnorm::{NormalizationPlan, Pipeline, TableWriter, config::parse_delimiter};

use super::{CommandResult, load_table};
use crate::cli::FormatChoice;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    plan: PathBuf,
    output_dir: PathBuf,
    delimiter: Option<String>,
    missing_marker: Option<String>,
    format: FormatChoice,
    json_output: bool,
    verbose: bool,
) -> CommandResult {
    if !plan.exists() {
        return Err(format!("Plan file not found: {}", plan.display()).into());
    }
    let plan = NormalizationPlan::load(&plan)?;
    let table = load_table(&file)?;

    let mut config = plan.config.clone();
    if let Some(delimiter) = delimiter {
        config = config.with_delimiter(parse_delimiter(&delimiter)?);
    }
    if let Some(marker) = missing_marker {
        config = config.with_missing_marker(marker);
    }

    if !json_output {
        eprintln!(
            "{} {} ({} rows, {} columns)",
            "Normalizing".cyan().bold(),
            file.display(),
            table.row_count(),
            table.column_count()
        );
    }

    let dataset = Pipeline::new(plan).with_config(config).run(&table)?;

    let writer = TableWriter::new(format.into());
    let extension = writer.format().extension();
    let mut written = Vec::new();
    for (name, output) in dataset.tables()? {
        let path = output_dir.join(format!("{}.{}", name, extension));
        writer.write_file(&output, &path)?;
        written.push((path, output.row_count()));
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&dataset.report)?);
        return Ok(());
    }

    if verbose {
        eprintln!();
        eprintln!("{}", "Stages".white().bold());
        for stage in &dataset.report.stages {
            eprintln!("  {} {}", "•".dimmed(), stage.description());
        }
    }

    eprintln!();
    eprintln!(
        "{} {} tables to {}",
        "Wrote".green().bold(),
        written.len(),
        output_dir.display().to_string().cyan()
    );
    for (path, rows) in &written {
        eprintln!(
            "  {} {} ({} rows)",
            "→".dimmed(),
            path.display(),
            rows
        );
    }

    Ok(())
}
