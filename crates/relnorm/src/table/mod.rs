//! Tabular data model shared by every transformation.

mod data;
mod dimension;
mod junction;
mod value;

pub use data::{Column, DataTable};
pub use dimension::{DimensionTable, ID_COLUMN};
pub use junction::JunctionTable;
pub use value::Value;
