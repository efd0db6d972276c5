//! The four normalization primitives: clean, unpack, extract and map.
//!
//! Each is a pure function over its inputs and can be used on its own; the
//! [`crate::pipeline`] module chains them per column.

mod cleaner;
mod extractor;
mod mapper;
mod unpacker;

pub use cleaner::{clean, clean_column, clean_value};
pub use extractor::{extract, extract_column};
pub use mapper::map_values;
pub use unpacker::{split_packed, unpack};
