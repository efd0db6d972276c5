//! Dimension (lookup) tables with dense surrogate keys.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::data::DataTable;
use super::value::Value;
use crate::error::Result;

/// Name of the surrogate key column in every dimension table.
pub const ID_COLUMN: &str = "id";

/// A deduplicated set of values, each with a 1-based surrogate key.
///
/// The value at insertion position `i` has key `i + 1`, so keys are unique,
/// contiguous and follow first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTable {
    /// Name of the value column.
    pub value_column: String,
    values: IndexSet<Value>,
}

impl DimensionTable {
    /// Create an empty dimension table.
    pub fn new(value_column: impl Into<String>) -> Self {
        Self {
            value_column: value_column.into(),
            values: IndexSet::new(),
        }
    }

    /// Insert a value, returning its key. Existing values keep their key.
    pub fn insert(&mut self, value: Value) -> i64 {
        let (index, _) = self.values.insert_full(value);
        key_for(index)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Surrogate key of `value`, if present.
    pub fn id_of(&self, value: &Value) -> Option<i64> {
        self.values.get_index_of(value).map(key_for)
    }

    /// Value for surrogate key `id`, if present.
    pub fn value_of(&self, id: i64) -> Option<&Value> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.values.get_index(index)
    }

    /// Iterate over `(id, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Value)> {
        self.values.iter().enumerate().map(|(i, v)| (key_for(i), v))
    }

    /// Replace each value by its surrogate key; unknown values become `Null`.
    pub fn map_values(&self, values: &[Value]) -> Vec<Value> {
        values
            .iter()
            .map(|v| self.id_of(v).map(Value::Int).unwrap_or(Value::Null))
            .collect()
    }

    /// Convert into a generic `(id, value)` table ordered by key.
    pub fn to_table(&self) -> Result<DataTable> {
        DataTable::new(
            vec![ID_COLUMN.to_string(), self.value_column.clone()],
            self.iter()
                .map(|(id, v)| vec![Value::Int(id), v.clone()])
                .collect(),
        )
    }
}

fn key_for(index: usize) -> i64 {
    index as i64 + 1
}
