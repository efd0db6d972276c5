//! Pipeline engine that chains the primitives as a plan dictates.

use indexmap::IndexMap;
use tracing::{debug, info_span, warn};

use crate::config::NormalizeConfig;
use crate::error::Result;
use crate::table::{Column, DataTable, DimensionTable, JunctionTable, Value};
use crate::transform::{clean_column, extract, unpack};

use super::plan::{DimensionSpec, NormalizationPlan, RelationSpec};
use super::report::{PipelineReport, StageKind, StageSummary};

/// Output of a pipeline run: the normalized tables and an audit report.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    /// Name of the base table.
    pub base_name: String,
    /// Cleaned input without packed columns, with categorical columns
    /// replaced by `<name>_id` key columns.
    pub base: DataTable,
    /// Dimension tables by name.
    pub dimensions: IndexMap<String, DimensionTable>,
    /// Junction tables by name, value column holding dimension keys.
    pub relations: IndexMap<String, JunctionTable>,
    /// Stage-by-stage audit.
    pub report: PipelineReport,
}

impl NormalizedDataset {
    /// Every output table with its name: base first, then dimensions, then
    /// junctions.
    pub fn tables(&self) -> Result<Vec<(String, DataTable)>> {
        let mut tables = vec![(self.base_name.clone(), self.base.clone())];
        for (name, dimension) in &self.dimensions {
            tables.push((name.clone(), dimension.to_table()?));
        }
        for (name, junction) in &self.relations {
            tables.push((name.clone(), junction.to_table()?));
        }
        Ok(tables)
    }
}

/// Runs a [`NormalizationPlan`] over a table.
///
/// Stages run in a fixed order: clean every listed column, then for each
/// relation unpack, extract the dimension from the junction values and map
/// the junction onto keys, then for each categorical column extract its
/// non-missing values and map the column onto keys.
pub struct Pipeline {
    plan: NormalizationPlan,
    config: NormalizeConfig,
}

impl Pipeline {
    /// Create a pipeline using the plan's own settings.
    pub fn new(plan: NormalizationPlan) -> Self {
        let config = plan.config.clone();
        Self { plan, config }
    }

    /// Override the plan's transformation settings.
    pub fn with_config(mut self, config: NormalizeConfig) -> Self {
        self.config = config;
        self
    }

    /// The plan being run.
    pub fn plan(&self) -> &NormalizationPlan {
        &self.plan
    }

    /// The active transformation settings.
    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Run the plan. The input table is left untouched.
    pub fn run(&self, table: &DataTable) -> Result<NormalizedDataset> {
        self.config.validate()?;
        let plan = NormalizationPlan {
            config: self.config.clone(),
            ..self.plan.clone()
        };
        plan.validate(table)?;

        let span = info_span!(
            "normalize",
            base = %plan.base_name,
            rows = table.row_count(),
            columns = table.column_count()
        );
        let _guard = span.enter();

        let mut report = PipelineReport::new();
        let mut base = table.clone();

        for column in &plan.clean {
            base = self.apply_clean(&base, column, &mut report)?;
        }

        let mut dimensions = IndexMap::new();
        let mut relations = IndexMap::new();

        for relation in &plan.relations {
            let (dimension, junction) = self.apply_relation(&base, relation, &mut report)?;
            dimensions.insert(relation.name.clone(), dimension);
            relations.insert(plan.junction_name(relation), junction);
        }

        let packed: Vec<&str> = plan.relations.iter().map(|r| r.column.as_str()).collect();
        base = base.without_columns(&packed)?;

        for spec in &plan.dimensions {
            let (dimension, rewritten) = self.apply_dimension(&base, spec, &mut report)?;
            dimensions.insert(spec.name.clone(), dimension);
            base = rewritten;
        }

        debug!(
            stages = report.stages_applied,
            dimensions = dimensions.len(),
            relations = relations.len(),
            "pipeline finished"
        );

        Ok(NormalizedDataset {
            base_name: plan.base_name.clone(),
            base,
            dimensions,
            relations,
            report,
        })
    }

    fn apply_clean(
        &self,
        table: &DataTable,
        column: &str,
        report: &mut PipelineReport,
    ) -> Result<DataTable> {
        let original = table.column(column)?;
        let cleaned = clean_column(&original);
        let changed = original
            .values
            .iter()
            .zip(&cleaned.values)
            .filter(|(before, after)| before != after)
            .count();

        report.add_stage(StageSummary {
            stage: StageKind::Clean,
            column: column.to_string(),
            rows_in: original.len(),
            rows_out: cleaned.len(),
            values_changed: changed,
        });

        table.with_column(cleaned)
    }

    fn apply_relation(
        &self,
        table: &DataTable,
        relation: &RelationSpec,
        report: &mut PipelineReport,
    ) -> Result<(DimensionTable, JunctionTable)> {
        let config = match relation.delimiter {
            Some(delimiter) => self.config.clone().with_delimiter(delimiter),
            None => self.config.clone(),
        };

        let junction = unpack(table, &self.plan.id_column, &relation.column, &config)?;
        report.add_stage(StageSummary {
            stage: StageKind::Unpack,
            column: relation.column.clone(),
            rows_in: table.row_count(),
            rows_out: junction.len(),
            values_changed: 0,
        });
        if junction.is_empty() && !table.is_empty() {
            warn!(column = %relation.column, "packed column holds no values");
        }

        let values = junction.values().values;
        let dimension = extract(&values, &relation.name);
        report.add_stage(StageSummary {
            stage: StageKind::Extract,
            column: relation.column.clone(),
            rows_in: values.len(),
            rows_out: dimension.len(),
            values_changed: 0,
        });

        let keys = dimension.map_values(&values);
        let mut mapped = junction.with_values(keys)?;
        mapped.value_column = NormalizationPlan::key_column(&relation.name);
        report.add_stage(StageSummary {
            stage: StageKind::Map,
            column: relation.column.clone(),
            rows_in: values.len(),
            rows_out: mapped.len(),
            values_changed: values.len() - mapped.len(),
        });

        Ok((dimension, mapped))
    }

    fn apply_dimension(
        &self,
        table: &DataTable,
        spec: &DimensionSpec,
        report: &mut PipelineReport,
    ) -> Result<(DimensionTable, DataTable)> {
        let column = table.column(&spec.column)?;
        let present: Vec<Value> = column.values.iter().filter(|v| !v.is_null()).cloned().collect();

        let dimension = extract(&present, &spec.name);
        report.add_stage(StageSummary {
            stage: StageKind::Extract,
            column: spec.column.clone(),
            rows_in: column.len(),
            rows_out: dimension.len(),
            values_changed: 0,
        });

        let keys = dimension.map_values(&column.values);
        let unmatched = keys.iter().filter(|k| k.is_null()).count();
        report.add_stage(StageSummary {
            stage: StageKind::Map,
            column: spec.column.clone(),
            rows_in: column.len(),
            rows_out: keys.len(),
            values_changed: unmatched,
        });

        let rewritten = table
            .with_column(Column::new(spec.column.clone(), keys))?
            .rename_column(&spec.column, &NormalizationPlan::key_column(&spec.name))?;

        Ok((dimension, rewritten))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;

    fn movies() -> DataTable {
        DataTable::new(
            vec!["id".into(), "title".into(), "genres".into(), "country".into()],
            vec![
                vec![
                    Value::Int(1),
                    Value::text("Alien (1979)"),
                    Value::text("Horror;Sci-Fi"),
                    Value::text("UK"),
                ],
                vec![
                    Value::Int(2),
                    Value::text("Heat"),
                    Value::text("Crime"),
                    Value::text("US"),
                ],
                vec![
                    Value::Int(3),
                    Value::text("Ran"),
                    Value::Null,
                    Value::Null,
                ],
                vec![
                    Value::Int(4),
                    Value::text("Aliens"),
                    Value::text("Sci-Fi;Horror;"),
                    Value::text("UK"),
                ],
            ],
        )
        .unwrap()
    }

    fn plan() -> NormalizationPlan {
        NormalizationPlan::new("id")
            .with_base_name("movies")
            .clean_column("title")
            .relation("genres", "genre")
            .dimension("country", "country")
    }

    #[test]
    fn test_run_produces_all_tables() {
        let output = Pipeline::new(plan()).run(&movies()).unwrap();

        assert_eq!(output.base.headers, vec!["id", "title", "country_id"]);
        assert_eq!(output.base.get(0, 1), Some(&Value::text("Alien")));
        assert_eq!(
            output.base.column("country_id").unwrap().values,
            vec![Value::Int(1), Value::Int(2), Value::Null, Value::Int(1)]
        );

        let genre = &output.dimensions["genre"];
        assert_eq!(genre.len(), 3);
        assert_eq!(genre.value_of(1), Some(&Value::text("Horror")));

        let junction = &output.relations["movies_genre"];
        assert_eq!(junction.value_column, "genre_id");
        assert_eq!(
            junction.rows,
            vec![
                (Value::Int(1), Value::Int(1)),
                (Value::Int(1), Value::Int(2)),
                (Value::Int(2), Value::Int(3)),
                (Value::Int(4), Value::Int(2)),
                (Value::Int(4), Value::Int(1)),
            ]
        );

        let names: Vec<String> = output.tables().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["movies", "genre", "country", "movies_genre"]);
    }

    #[test]
    fn test_input_untouched() {
        let input = movies();
        let _ = Pipeline::new(plan()).run(&input).unwrap();
        assert_eq!(input, movies());
    }

    #[test]
    fn test_report_lists_stages_in_order() {
        let output = Pipeline::new(plan()).run(&movies()).unwrap();
        let kinds: Vec<StageKind> = output.report.stages.iter().map(|s| s.stage).collect();
        assert_eq!(
            kinds,
            vec![
                StageKind::Clean,
                StageKind::Unpack,
                StageKind::Extract,
                StageKind::Map,
                StageKind::Extract,
                StageKind::Map,
            ]
        );
        // Only "Alien (1979)" changed during cleaning
        assert_eq!(output.report.stages[0].values_changed, 1);
        // Missing country stays missing
        assert_eq!(output.report.stages[5].values_changed, 1);
    }

    #[test]
    fn test_config_override_changes_delimiter() {
        let table = DataTable::new(
            vec!["id".into(), "tags".into()],
            vec![vec![Value::Int(1), Value::text("a|b")]],
        )
        .unwrap();
        let plan = NormalizationPlan::new("id").relation("tags", "tag");

        let default = Pipeline::new(plan.clone()).run(&table).unwrap();
        assert_eq!(default.dimensions["tag"].len(), 1);

        let piped = Pipeline::new(plan)
            .with_config(NormalizeConfig::default().with_delimiter('|'))
            .run(&table)
            .unwrap();
        assert_eq!(piped.dimensions["tag"].len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let table = DataTable::empty(["id", "title", "genres", "country"]).unwrap();
        let output = Pipeline::new(plan()).run(&table).unwrap();
        assert!(output.base.is_empty());
        assert_eq!(output.base.headers, vec!["id", "title", "country_id"]);
        assert!(output.relations["movies_genre"].is_empty());
        assert!(output.dimensions["country"].is_empty());
    }

    #[test]
    fn test_invalid_plan_fails_before_running() {
        let plan = NormalizationPlan::new("movie_id");
        assert!(Pipeline::new(plan).run(&movies()).is_err());
    }

    #[test]
    fn test_key_column_collisions_rejected_as_plan_errors() {
        let with_key = movies()
            .with_column(Column::new("country_id", vec![Value::Null; 4]))
            .unwrap();
        assert!(matches!(
            Pipeline::new(plan()).run(&with_key),
            Err(NormalizeError::Plan(_))
        ));

        let table = movies().rename_column("id", "genre_id").unwrap();
        let plan = NormalizationPlan::new("genre_id").relation("genres", "genre");
        assert!(matches!(
            Pipeline::new(plan).run(&table),
            Err(NormalizeError::Plan(_))
        ));
    }
}
