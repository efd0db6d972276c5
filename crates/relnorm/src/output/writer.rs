//! Writing tables as delimited text or JSON records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};
use crate::table::{DataTable, Value};

/// Output format for tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array of row objects.
    Json,
}

impl OutputFormat {
    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

/// Serializes tables for downstream loaders.
pub struct TableWriter {
    format: OutputFormat,
}

impl TableWriter {
    /// Create a writer for the given format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// The format this writer produces.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a table to any sink. Missing values become empty fields in
    /// delimited output and `null` in JSON.
    pub fn write<W: Write>(&self, table: &DataTable, writer: W) -> Result<()> {
        match self.format {
            OutputFormat::Csv => write_delimited(table, writer, b','),
            OutputFormat::Tsv => write_delimited(table, writer, b'\t'),
            OutputFormat::Json => write_json(table, writer),
        }
    }

    /// Write a table to a file, creating parent directories as needed.
    pub fn write_file(&self, table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_error = |e| NormalizeError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        self.write(table, &mut writer)?;
        writer.flush().map_err(io_error)
    }

    /// Render a table to a string.
    pub fn render(&self, table: &DataTable) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(table, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn write_delimited<W: Write>(table: &DataTable, writer: W, delimiter: u8) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(&table.headers)?;
    for row in &table.rows {
        csv_writer.write_record(row.iter().map(Value::to_string))?;
    }
    csv_writer.flush().map_err(|e| NormalizeError::Csv(e.into()))?;
    Ok(())
}

fn write_json<W: Write>(table: &DataTable, writer: W) -> Result<()> {
    let records: Vec<IndexMap<&str, &Value>> = table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}
