//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// relnorm: relational normalization toolkit
#[derive(Parser)]
#[command(name = "relnorm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean free-text columns (strip annotations, normalize separators)
    Clean {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to clean (repeatable)
        #[arg(short, long, required = true)]
        column: Vec<String>,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: FormatChoice,
    },

    /// Unpack a multi-valued column into an (id, value) junction table
    Unpack {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Id column used as the junction's foreign key
        #[arg(long)]
        id: String,

        /// Packed column to unpack
        #[arg(short, long)]
        column: String,

        /// Delimiter between packed values
        #[arg(short, long, default_value = ";")]
        delimiter: String,

        /// Text treated as a missing packed value
        #[arg(long, default_value = "")]
        missing_marker: String,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: FormatChoice,
    },

    /// Extract a dimension table with surrogate keys from a column
    Extract {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to extract distinct values from
        #[arg(short, long)]
        column: String,

        /// Name of the value column in the dimension (default: column name)
        #[arg(short, long)]
        name: Option<String>,

        /// Leave missing values out of the dimension
        #[arg(long)]
        drop_missing: bool,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: FormatChoice,
    },

    /// Rewrite a column into the surrogate keys of a dimension table
    Map {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to rewrite
        #[arg(short, long)]
        column: String,

        /// Path to the dimension table (CSV/TSV)
        #[arg(long, value_name = "DIMENSION_FILE")]
        dimension: PathBuf,

        /// Key column of the dimension table
        #[arg(long, default_value = "id")]
        id_col: String,

        /// Value column of the dimension table
        #[arg(long)]
        value_col: String,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: FormatChoice,
    },

    /// Run a normalization plan and write every output table
    Normalize {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the JSON normalization plan
        #[arg(short, long, value_name = "PLAN_FILE")]
        plan: PathBuf,

        /// Directory for output tables
        #[arg(short, long, default_value = "normalized")]
        output_dir: PathBuf,

        /// Delimiter override for packed columns
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Missing-value marker override
        #[arg(long)]
        missing_marker: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: FormatChoice,

        /// Print the stage report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum FormatChoice {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl From<FormatChoice> for relnorm::OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Csv => relnorm::OutputFormat::Csv,
            FormatChoice::Tsv => relnorm::OutputFormat::Tsv,
            FormatChoice::Json => relnorm::OutputFormat::Json,
        }
    }
}

impl std::str::FromStr for FormatChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(FormatChoice::Csv),
            "tsv" => Ok(FormatChoice::Tsv),
            "json" => Ok(FormatChoice::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for FormatChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatChoice::Csv => write!(f, "csv"),
            FormatChoice::Tsv => write!(f, "tsv"),
            FormatChoice::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_unpack_defaults() {
        let cli = Cli::try_parse_from([
            "relnorm", "unpack", "movies.csv", "--id", "id", "--column", "genres",
        ])
        .unwrap();
        match cli.command {
            Commands::Unpack {
                delimiter,
                missing_marker,
                format,
                ..
            } => {
                assert_eq!(delimiter, ";");
                assert_eq!(missing_marker, "");
                assert!(matches!(format, FormatChoice::Csv));
            }
            _ => panic!("expected unpack"),
        }
    }

    #[test]
    fn test_format_choice_parse() {
        assert!(matches!("TSV".parse::<FormatChoice>(), Ok(FormatChoice::Tsv)));
        assert!("xml".parse::<FormatChoice>().is_err());
    }
}
