//! CSV/TSV loader with delimiter detection.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{NormalizeError, Result};
use crate::table::{DataTable, Value};

/// Delimiters to try when auto-detecting, in tie-break order.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const SAMPLE_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Field contents read as missing values.
    pub null_markers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            null_markers: vec![String::new()],
        }
    }
}

/// Loads delimited text files into a [`DataTable`].
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file into a table.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<DataTable> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| NormalizeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let table = self.parse_bytes(&contents)?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );
        Ok(table)
    }

    /// Parse in-memory bytes into a table.
    ///
    /// A header with no data rows yields an empty, correctly-shaped table.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => record?.iter().map(|s| s.to_string()).collect(),
                None => return Err(NormalizeError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut raw_rows: Vec<csv::StringRecord> = Vec::new();
        for record in records {
            if let Some(max) = self.config.max_rows {
                if raw_rows.len() >= max {
                    break;
                }
            }
            raw_rows.push(record?);
        }

        // Generate column names from the first record when there is no header
        let headers = if self.config.has_header {
            headers
        } else {
            match raw_rows.first() {
                Some(first) => (0..first.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                None => return Err(NormalizeError::EmptyData("No data rows found".to_string())),
            }
        };

        if headers.is_empty() {
            return Err(NormalizeError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let rows = raw_rows
            .iter()
            .map(|record| {
                let mut row: Vec<Value> = record
                    .iter()
                    .take(expected_cols)
                    .map(|field| Value::parse(field, &self.config.null_markers))
                    .collect();
                // Pad short rows
                row.resize(expected_cols, Value::Null);
                row
            })
            .collect();

        DataTable::new(headers, rows)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Guess the field delimiter from the first non-blank lines.
///
/// A candidate ranks higher when every sampled line holds the same number
/// of unquoted occurrences of it, then by how many fields it yields. Ties go
/// to the earlier entry in the candidate list, so tabs win over commas.
/// Falls back to `,` when no candidate appears on the first line.
pub fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let sample: Vec<&[u8]> = bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .take(SAMPLE_LINES)
        .collect();

    if sample.is_empty() {
        return Err(NormalizeError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best: Option<(u8, (bool, usize))> = None;
    for &candidate in DELIMITERS {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| unquoted_occurrences(line, candidate))
            .collect();
        let first = counts[0];
        if first == 0 {
            continue;
        }

        let rank = (counts.iter().all(|&c| c == first), first);
        if best.is_none_or(|(_, current)| rank > current) {
            best = Some((candidate, rank));
        }
    }

    Ok(best.map_or(b',', |(delimiter, _)| delimiter))
}

fn unquoted_occurrences(line: &[u8], delimiter: u8) -> usize {
    line.iter()
        .scan(false, |quoted, &b| {
            if b == b'"' {
                *quoted = !*quoted;
            }
            Some(!*quoted && b == delimiter)
        })
        .filter(|&hit| hit)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_quoted_delimiters_are_ignored() {
        let data = b"id\ttitle\n1\t\"Heat, the\"\n2\t\"Up, up, away\"";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_packed_semicolons_inside_csv() {
        // Commas are consistent, semicolons vary per line
        let data = b"id,genres\n1,Action;Comedy\n2,Drama\n3,A;B;C";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"id,name,genres\n1,Alice,a;b\n2,,c";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.headers, vec!["id", "name", "genres"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Value::Int(1)));
        assert_eq!(table.get(0, 2), Some(&Value::text("a;b")));
        assert_eq!(table.get(1, 1), Some(&Value::Null));
    }

    #[test]
    fn test_leading_zeros_and_signs_survive_round_trip() {
        let table = Parser::new().parse_bytes(b"id,zip\n1,007\n2,+5\n").unwrap();
        assert_eq!(table.get(0, 1), Some(&Value::text("007")));
        assert_eq!(table.get(1, 1), Some(&Value::text("+5")));

        let rendered = crate::output::TableWriter::new(crate::output::OutputFormat::Csv)
            .render(&table)
            .unwrap();
        assert_eq!(rendered, "id,zip\n1,007\n2,+5\n");
    }

    #[test]
    fn test_pads_and_truncates_rows() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some(b','),
            ..Default::default()
        });
        let table = parser.parse_bytes(b"a,b\n1\n2,3,4").unwrap();
        assert_eq!(table.rows[0], vec![Value::Int(1), Value::Null]);
        assert_eq!(table.rows[1], vec![Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_custom_null_markers() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some(b','),
            null_markers: vec![String::new(), "NA".to_string()],
            ..Default::default()
        });
        let table = parser.parse_bytes(b"a,b\nNA,x").unwrap();
        assert_eq!(table.get(0, 0), Some(&Value::Null));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some(b','),
            ..Default::default()
        });
        let table = parser.parse_bytes(b"id,genres\n").unwrap();
        assert_eq!(table.headers, vec!["id", "genres"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_no_header_generates_names() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some(b','),
            has_header: false,
            ..Default::default()
        });
        let table = parser.parse_bytes(b"1,x\n2,y").unwrap();
        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..Default::default()
        });
        let table = parser.parse_bytes(b"a,b\n1,2\n3,4").unwrap();
        assert_eq!(table.row_count(), 1);
    }
}
