//! Per-call configuration for the transformation primitives.

use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// Default delimiter between sub-values of a packed cell.
pub const DEFAULT_DELIMITER: char = ';';

/// Settings shared by the transformations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Splits packed cells into sub-values.
    pub delimiter: char,
    /// Text form of a missing value. A sub-value equal to this marker is
    /// treated as absent, and a `Null` cell is coerced to it before
    /// splitting.
    pub missing_marker: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            missing_marker: String::new(),
        }
    }
}

impl NormalizeConfig {
    /// Create a configuration with the given delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the text form of missing values.
    pub fn with_missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = marker.into();
        self
    }

    /// Check the configuration is usable.
    ///
    /// Sub-values are trimmed after splitting, so a whitespace delimiter
    /// would be indistinguishable from padding.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_whitespace() {
            return Err(NormalizeError::InvalidDelimiter(format!(
                "{:?} is whitespace",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Parse a delimiter given as text, which must be exactly one character.
pub fn parse_delimiter(s: &str) -> Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(NormalizeError::InvalidDelimiter(format!(
            "'{}' must be a single character",
            s
        ))),
    }
}
