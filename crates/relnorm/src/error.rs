//! Error types for the relnorm library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for relnorm operations.
///
/// The transformation primitives never fail on irregular data (missing
/// cells, empty packed lists, duplicate ids); these variants are reserved
/// for caller contract violations and collaborator I/O.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A named column does not exist in the table.
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Two columns share a name.
    #[error("Duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// A row does not have one cell per header.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column or value list does not match the length of the rows it
    /// is paired with.
    #[error("Length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A dimension table lists the same value more than once, so the
    /// value-to-key lookup would be ambiguous.
    #[error("Dimension column '{column}' contains duplicate value {value}")]
    DuplicateDimensionValue { column: String, value: String },

    /// Invalid delimiter specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Invalid normalization plan.
    #[error("Plan error: {0}")]
    Plan(String),
}

/// Result type alias for relnorm operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
