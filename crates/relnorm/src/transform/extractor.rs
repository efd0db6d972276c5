//! Factor a column of values out into a dimension table.

use tracing::debug;

use crate::table::{Column, DimensionTable, Value};

/// Build a dimension table from the distinct values of a column.
///
/// Values keep first-occurrence order and are keyed `1..=N`. `Null` is
/// treated like any other value; callers that want missing values kept out
/// of the dimension filter them beforehand.
pub fn extract(values: &[Value], output_name: &str) -> DimensionTable {
    let mut dimension = DimensionTable::new(output_name);
    for value in values {
        dimension.insert(value.clone());
    }

    debug!(
        output_name,
        values_in = values.len(),
        distinct = dimension.len(),
        "extracted dimension"
    );

    dimension
}

/// Build a dimension table from a named column.
pub fn extract_column(column: &Column, output_name: &str) -> DimensionTable {
    extract(&column.values, output_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<Value> {
        values.iter().map(|s| Value::text(*s)).collect()
    }

    #[test]
    fn test_first_occurrence_order() {
        let dim = extract(&texts(&["x", "y", "x", "z"]), "v");
        let pairs: Vec<_> = dim.iter().map(|(id, v)| (id, v.clone())).collect();
        assert_eq!(
            pairs,
            vec![
                (1, Value::text("x")),
                (2, Value::text("y")),
                (3, Value::text("z"))
            ]
        );
    }

    #[test]
    fn test_null_is_a_value() {
        let dim = extract(&[Value::Null, Value::text("a"), Value::Null], "v");
        assert_eq!(dim.len(), 2);
        assert_eq!(dim.id_of(&Value::Null), Some(1));
    }

    #[test]
    fn test_empty_input() {
        let dim = extract(&[], "genre");
        assert!(dim.is_empty());
        let table = dim.to_table().unwrap();
        assert_eq!(table.headers, vec!["id", "genre"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_extract_column_uses_output_name() {
        let column = Column::new("raw_genre", texts(&["a"]));
        let dim = extract_column(&column, "genre");
        assert_eq!(dim.value_column, "genre");
    }
}
