//! Rewrite raw values into dimension surrogate keys.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::error::{NormalizeError, Result};
use crate::table::{DataTable, Value};

/// Replace each value by the id it has in `dimension`.
///
/// The lookup is built from `value_col -> id_col`. Values absent from the
/// dimension become `Null`. A dimension whose `value_col` repeats a value
/// is ambiguous and rejected with
/// [`NormalizeError::DuplicateDimensionValue`], even when both rows carry
/// the same id.
pub fn map_values(
    values: &[Value],
    dimension: &DataTable,
    id_col: &str,
    value_col: &str,
) -> Result<Vec<Value>> {
    let id_idx = dimension.require_column(id_col)?;
    let value_idx = dimension.require_column(value_col)?;

    let mut lookup: HashMap<&Value, &Value> = HashMap::with_capacity(dimension.row_count());
    for row in &dimension.rows {
        let (Some(key), Some(id)) = (row.get(value_idx), row.get(id_idx)) else {
            continue;
        };
        match lookup.entry(key) {
            Entry::Occupied(_) => {
                return Err(NormalizeError::DuplicateDimensionValue {
                    column: value_col.to_string(),
                    value: format!("'{}'", key),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
    }

    let mapped: Vec<Value> = values
        .iter()
        .map(|v| lookup.get(v).map(|id| (*id).clone()).unwrap_or(Value::Null))
        .collect();

    debug!(
        value_col,
        values_in = values.len(),
        unmapped = mapped.iter().filter(|v| v.is_null()).count(),
        "mapped values to keys"
    );

    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::extract;

    fn dimension(rows: &[(i64, &str)]) -> DataTable {
        DataTable::new(
            vec!["id".into(), "v".into()],
            rows.iter()
                .map(|(id, v)| vec![Value::Int(*id), Value::text(*v)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_maps_known_values() {
        let column = vec![Value::text("x"), Value::text("y"), Value::text("x")];
        let mapped = map_values(&column, &dimension(&[(1, "x"), (2, "y")]), "id", "v").unwrap();
        assert_eq!(mapped, vec![Value::Int(1), Value::Int(2), Value::Int(1)]);
    }

    #[test]
    fn test_unknown_value_is_null() {
        let mapped = map_values(&[Value::text("w")], &dimension(&[(1, "x")]), "id", "v").unwrap();
        assert_eq!(mapped, vec![Value::Null]);
    }

    #[test]
    fn test_duplicate_dimension_value_rejected() {
        let err = map_values(
            &[Value::text("x")],
            &dimension(&[(1, "x"), (2, "x")]),
            "id",
            "v",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::DuplicateDimensionValue { ref column, .. } if column == "v"
        ));
    }

    #[test]
    fn test_missing_columns() {
        let dim = dimension(&[(1, "x")]);
        assert!(matches!(
            map_values(&[], &dim, "key", "v"),
            Err(NormalizeError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_column() {
        let mapped = map_values(&[], &dimension(&[(1, "x")]), "id", "v").unwrap();
        assert!(mapped.is_empty());
    }

    #[test]
    fn test_round_trip_through_extracted_table() {
        let column = vec![Value::text("b"), Value::text("a"), Value::text("b")];
        let dim = extract(&column, "v");
        let mapped = map_values(&column, &dim.to_table().unwrap(), "id", "v").unwrap();
        assert_eq!(mapped, vec![Value::Int(1), Value::Int(2), Value::Int(1)]);
        assert_eq!(mapped, dim.map_values(&column));
    }
}
