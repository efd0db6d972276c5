//! Junction (association) tables produced by unpacking.

use serde::{Deserialize, Serialize};

use super::data::{Column, DataTable};
use super::value::Value;
use crate::error::{NormalizeError, Result};

/// A two-column many-to-many association between an id and a value.
///
/// The value column never holds `Null`, and rows stay sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JunctionTable {
    /// Name of the id (foreign key) column.
    pub id_column: String,
    /// Name of the value column.
    pub value_column: String,
    /// `(id, value)` pairs.
    pub rows: Vec<(Value, Value)>,
}

impl JunctionTable {
    /// Create an empty junction table.
    pub fn new(id_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            value_column: value_column.into(),
            rows: Vec::new(),
        }
    }

    /// Number of association rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no association rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The id column.
    pub fn ids(&self) -> Column {
        Column::new(
            self.id_column.clone(),
            self.rows.iter().map(|(id, _)| id.clone()).collect(),
        )
    }

    /// The value column.
    pub fn values(&self) -> Column {
        Column::new(
            self.value_column.clone(),
            self.rows.iter().map(|(_, v)| v.clone()).collect(),
        )
    }

    /// Return a new junction table whose value column is replaced by
    /// `values`, typically surrogate keys from a mapping pass.
    ///
    /// Pairs whose new value is `Null` are dropped so the value column
    /// stays free of missing entries.
    pub fn with_values(&self, values: Vec<Value>) -> Result<JunctionTable> {
        if values.len() != self.rows.len() {
            return Err(NormalizeError::LengthMismatch {
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        let rows = self
            .rows
            .iter()
            .zip(values)
            .filter(|(_, v)| !v.is_null())
            .map(|((id, _), v)| (id.clone(), v))
            .collect();

        Ok(JunctionTable {
            id_column: self.id_column.clone(),
            value_column: self.value_column.clone(),
            rows,
        })
    }

    /// Convert into a generic two-column table.
    pub fn to_table(&self) -> Result<DataTable> {
        DataTable::new(
            vec![self.id_column.clone(), self.value_column.clone()],
            self.rows
                .iter()
                .map(|(id, v)| vec![id.clone(), v.clone()])
                .collect(),
        )
    }
}
