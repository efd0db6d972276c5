//! Audit trail of a pipeline run.

use serde::{Deserialize, Serialize};

/// Kind of stage executed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Free-text cleaning of a column.
    Clean,
    /// Packed column exploded into a junction table.
    Unpack,
    /// Distinct values factored into a dimension table.
    Extract,
    /// Values rewritten to surrogate keys.
    Map,
}

impl StageKind {
    /// Short lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            StageKind::Clean => "clean",
            StageKind::Unpack => "unpack",
            StageKind::Extract => "extract",
            StageKind::Map => "map",
        }
    }
}

/// Summary of a single stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    /// Stage kind.
    pub stage: StageKind,

    /// Column the stage operated on.
    pub column: String,

    /// Rows (or values) the stage consumed.
    pub rows_in: usize,

    /// Rows (or values) the stage produced.
    pub rows_out: usize,

    /// Values whose content changed: cleaned cells for `Clean`, cells that
    /// became missing for `Map`, zero otherwise.
    pub values_changed: usize,
}

impl StageSummary {
    /// Human-readable description of the stage.
    pub fn description(&self) -> String {
        match self.stage {
            StageKind::Clean => format!(
                "Cleaned '{}': {} of {} values changed",
                self.column, self.values_changed, self.rows_in
            ),
            StageKind::Unpack => format!(
                "Unpacked '{}': {} rows → {} pairs",
                self.column, self.rows_in, self.rows_out
            ),
            StageKind::Extract => format!(
                "Extracted '{}': {} values → {} distinct",
                self.column, self.rows_in, self.rows_out
            ),
            StageKind::Map => format!(
                "Mapped '{}' to keys: {} values, {} unmatched",
                self.column, self.rows_in, self.values_changed
            ),
        }
    }
}

/// Result summary of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Number of stages executed.
    pub stages_applied: usize,

    /// Total values changed across stages.
    pub values_changed: usize,

    /// Per-stage details, in execution order.
    pub stages: Vec<StageSummary>,
}

impl PipelineReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage.
    pub fn add_stage(&mut self, stage: StageSummary) {
        self.stages_applied += 1;
        self.values_changed += stage.values_changed;
        self.stages.push(stage);
    }

    /// Stages of a given kind.
    pub fn stages_of(&self, kind: StageKind) -> impl Iterator<Item = &StageSummary> {
        self.stages.iter().filter(move |s| s.stage == kind)
    }
}
