//! relnorm CLI - relational normalization of tabular data files.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            column,
            output,
            format,
        } => commands::clean::run(file, column, output, format, cli.verbose),

        Commands::Unpack {
            file,
            id,
            column,
            delimiter,
            missing_marker,
            output,
            format,
        } => commands::unpack::run(
            file,
            id,
            column,
            delimiter,
            missing_marker,
            output,
            format,
            cli.verbose,
        ),

        Commands::Extract {
            file,
            column,
            name,
            drop_missing,
            output,
            format,
        } => commands::extract::run(file, column, name, drop_missing, output, format, cli.verbose),

        Commands::Map {
            file,
            column,
            dimension,
            id_col,
            value_col,
            output,
            format,
        } => commands::map::run(
            file,
            column,
            dimension,
            id_col,
            value_col,
            output,
            format,
            cli.verbose,
        ),

        Commands::Normalize {
            file,
            plan,
            output_dir,
            delimiter,
            missing_marker,
            format,
            json,
        } => commands::normalize::run(
            file,
            plan,
            output_dir,
            delimiter,
            missing_marker,
            format,
            json,
            cli.verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
