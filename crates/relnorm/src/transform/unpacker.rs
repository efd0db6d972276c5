//! Explode packed multi-value cells into a junction table.

use tracing::debug;

use crate::config::NormalizeConfig;
use crate::error::Result;
use crate::table::{DataTable, JunctionTable, Value};

/// Unpack `packed_column` into one `(id, sub-value)` row per non-missing
/// sub-value.
///
/// Each cell is coerced to text (`Null` becomes the configured missing
/// marker), split on the configured delimiter and trimmed. Sub-values that
/// are empty or equal to the missing marker are dropped, as are rows whose
/// id is `Null`. The result is stably sorted by id, so sub-values sharing an
/// id keep their original order. Duplicate pairs are preserved.
///
/// Fails only if either column is absent from `table`.
pub fn unpack(
    table: &DataTable,
    id_column: &str,
    packed_column: &str,
    config: &NormalizeConfig,
) -> Result<JunctionTable> {
    let projected = table.select(&[id_column, packed_column])?;
    let marker = config.missing_marker.as_str();

    let mut junction = JunctionTable::new(id_column, packed_column);
    for row in &projected.rows {
        let (id, cell) = match row.as_slice() {
            [id, cell] => (id, cell),
            _ => continue,
        };
        if id.is_null() {
            continue;
        }

        let text = cell.as_text(marker);
        junction.rows.extend(
            split_packed(&text, config.delimiter, marker).map(|sub| (id.clone(), Value::text(sub))),
        );
    }

    junction.rows.sort_by(|a, b| a.0.cmp(&b.0));

    debug!(
        id_column,
        packed_column,
        rows_in = table.row_count(),
        rows_out = junction.len(),
        "unpacked column"
    );

    Ok(junction)
}

/// Split a packed cell into its non-missing, trimmed sub-values.
pub fn split_packed<'a>(
    text: &'a str,
    delimiter: char,
    missing_marker: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    text.split(delimiter)
        .map(str::trim)
        .filter(move |sub| !sub.is_empty() && *sub != missing_marker)
}
