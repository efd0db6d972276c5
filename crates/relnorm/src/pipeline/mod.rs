//! Explicit clean → unpack → extract → map pipeline driven by a plan.

mod engine;
mod plan;
mod report;

pub use engine::{NormalizedDataset, Pipeline};
pub use plan::{DimensionSpec, NormalizationPlan, RelationSpec};
pub use report::{PipelineReport, StageKind, StageSummary};
