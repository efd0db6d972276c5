//! relnorm: relational normalization toolkit for tabular datasets.
//!
//! relnorm turns a denormalized table holding free-text fields and packed
//! multi-value columns into dimension tables, junction tables and
//! surrogate-key columns ready to load into a relational database.
//!
//! # Core Primitives
//!
//! - **Clean**: strip bracketed annotations and stray separators from text
//! - **Unpack**: explode `;`-packed cells into `(id, value)` junction rows
//! - **Extract**: factor distinct values into a dimension with keys `1..=N`
//! - **Map**: rewrite values into the keys of a dimension table
//!
//! Each primitive is a pure function; [`Pipeline`] chains them per column.
//!
//! # Example
//!
//! ```
//! use relnorm::{DataTable, NormalizationPlan, Pipeline, Value};
//!
//! let table = DataTable::new(
//!     vec!["id".into(), "genres".into()],
//!     vec![
//!         vec![Value::Int(1), Value::text("Action;Comedy")],
//!         vec![Value::Int(2), Value::text("Action")],
//!     ],
//! )
//! .unwrap();
//!
//! let plan = NormalizationPlan::new("id").relation("genres", "genre");
//! let output = Pipeline::new(plan).run(&table).unwrap();
//!
//! assert_eq!(output.dimensions["genre"].len(), 2);
//! assert_eq!(output.relations["base_genre"].len(), 3);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod table;
pub mod transform;

pub use config::{DEFAULT_DELIMITER, NormalizeConfig};
pub use error::{NormalizeError, Result};
pub use input::{Parser, ParserConfig};
pub use output::{OutputFormat, TableWriter};
pub use pipeline::{
    DimensionSpec, NormalizationPlan, NormalizedDataset, Pipeline, PipelineReport, RelationSpec,
    StageKind, StageSummary,
};
pub use table::{Column, DataTable, DimensionTable, ID_COLUMN, JunctionTable, Value};
pub use transform::{clean, extract, map_values, unpack};
