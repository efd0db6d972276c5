//! Example: Normalize a tabular data file with relnorm.
//!
//! Usage:
//!   cargo run --example normalize -- <file_path> <id_column> <packed_column>
//!
//! Example:
//!   cargo run --example normalize -- movies.csv id genres

use std::env;
use std::path::Path;

use relnorm::{NormalizationPlan, OutputFormat, Parser, Pipeline, TableWriter};

fn main() -> relnorm::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: cargo run --example normalize -- <file_path> <id_column> <packed_column>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example normalize -- movies.csv id genres");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("relnorm: {}", file_path);
    println!("{}", separator);
    println!();

    let table = Parser::new().parse_file(path)?;
    println!("## Source");
    println!("  Rows: {}", table.row_count());
    println!("  Columns: {}", table.headers.join(", "));
    println!();

    let plan = NormalizationPlan::new(args[2].as_str()).relation(args[3].as_str(), "value");
    let output = Pipeline::new(plan).run(&table)?;

    println!("## Stages ({} total)", output.report.stages_applied);
    for stage in &output.report.stages {
        println!("  {}", stage.description());
    }
    println!();

    let writer = TableWriter::new(OutputFormat::Tsv);
    for (name, table) in output.tables()? {
        println!("## {} ({} rows)", name, table.row_count());
        print!("{}", writer.render(&table)?);
        println!();
    }

    Ok(())
}
