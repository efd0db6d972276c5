//! In-memory tabular data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::error::{NormalizeError, Result};

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Cell values in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of values in the column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

/// Represents tabular data with named, ordered columns.
///
/// Tables are never changed by the transformations in this crate; every
/// derived table is a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Create a new data table.
    ///
    /// Fails if two headers share a name or a row does not have exactly one
    /// cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(NormalizeError::DuplicateColumn(header.clone()));
            }
        }

        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != headers.len())
        {
            return Err(NormalizeError::RowWidth {
                row,
                expected: headers.len(),
                found: cells.len(),
            });
        }

        Ok(Self { headers, rows })
    }

    /// Create a table with the given headers and no rows.
    pub fn empty<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::new(headers.into_iter().map(Into::into).collect(), Vec::new())
    }

    /// Build a table from equal-length columns.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(NormalizeError::LengthMismatch {
                expected: row_count,
                found: bad.len(),
            });
        }

        let headers = columns.iter().map(|c| c.name.clone()).collect();
        let mut iters: Vec<_> = columns.into_iter().map(|c| c.values.into_iter()).collect();
        let rows: Vec<Vec<Value>> = (0..row_count)
            .map(|_| iters.iter_mut().filter_map(Iterator::next).collect())
            .collect();

        Self::new(headers, rows)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get the index of a column by name, failing if it does not exist.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| NormalizeError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Iterate over the values of a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Get a copy of a column by name.
    pub fn column(&self, name: &str) -> Result<Column> {
        let index = self.require_column(name)?;
        Ok(Column::new(name, self.column_values(index).cloned().collect()))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Project the table onto the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<DataTable> {
        let indices = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>>>()?;

        let headers = names.iter().map(|n| n.to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        DataTable::new(headers, rows)
    }

    /// Return a new table with `column` replacing the same-named column, or
    /// appended when no column has that name.
    pub fn with_column(&self, column: Column) -> Result<DataTable> {
        if column.len() != self.row_count() {
            return Err(NormalizeError::LengthMismatch {
                expected: self.row_count(),
                found: column.len(),
            });
        }

        let mut table = self.clone();
        match table.column_index(&column.name) {
            Some(index) => {
                for (row, value) in table.rows.iter_mut().zip(column.values) {
                    if let Some(cell) = row.get_mut(index) {
                        *cell = value;
                    }
                }
            }
            None => {
                table.headers.push(column.name);
                for (row, value) in table.rows.iter_mut().zip(column.values) {
                    row.push(value);
                }
            }
        }
        Ok(table)
    }

    /// Return a new table with column `from` renamed to `to`.
    pub fn rename_column(&self, from: &str, to: &str) -> Result<DataTable> {
        let index = self.require_column(from)?;
        let mut headers = self.headers.clone();
        headers[index] = to.to_string();
        DataTable::new(headers, self.rows.clone())
    }

    /// Return a new table without the named columns.
    pub fn without_columns(&self, names: &[&str]) -> Result<DataTable> {
        for name in names {
            self.require_column(name)?;
        }
        let keep: Vec<&str> = self
            .headers
            .iter()
            .map(String::as_str)
            .filter(|h| !names.contains(h))
            .collect();
        self.select(&keep)
    }
}
