//! Declarative description of how to normalize a table.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::NormalizeConfig;
use crate::error::{NormalizeError, Result};
use crate::table::{DataTable, ID_COLUMN};

fn default_base_name() -> String {
    "base".to_string()
}

/// A multi-valued column to unpack into a junction table plus a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSpec {
    /// Packed source column.
    pub column: String,
    /// Name of the dimension table and its value column.
    pub name: String,
    /// Delimiter override for this column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

/// A categorical column to factor out into a dimension table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    /// Source column.
    pub column: String,
    /// Name of the dimension table and its value column.
    pub name: String,
}

/// Which columns to clean, unpack and factor out.
///
/// # Example
///
/// ```
/// use relnorm::NormalizationPlan;
///
/// let plan = NormalizationPlan::new("id")
///     .clean_column("title")
///     .relation("genres", "genre")
///     .dimension("country", "country");
/// assert_eq!(plan.relations.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationPlan {
    /// Column identifying rows; becomes the foreign key of every junction.
    pub id_column: String,

    /// Name of the normalized base table.
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Transformation settings used unless overridden per column.
    #[serde(default)]
    pub config: NormalizeConfig,

    /// Free-text columns to clean before anything else.
    #[serde(default)]
    pub clean: Vec<String>,

    /// Packed columns to unpack.
    #[serde(default)]
    pub relations: Vec<RelationSpec>,

    /// Categorical columns to factor out.
    #[serde(default)]
    pub dimensions: Vec<DimensionSpec>,
}

impl NormalizationPlan {
    /// Create an empty plan keyed on `id_column`.
    pub fn new(id_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            base_name: default_base_name(),
            config: NormalizeConfig::default(),
            clean: Vec::new(),
            relations: Vec::new(),
            dimensions: Vec::new(),
        }
    }

    /// Set the base table name.
    pub fn with_base_name(mut self, name: impl Into<String>) -> Self {
        self.base_name = name.into();
        self
    }

    /// Set the transformation settings.
    pub fn with_config(mut self, config: NormalizeConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a column to clean.
    pub fn clean_column(mut self, column: impl Into<String>) -> Self {
        self.clean.push(column.into());
        self
    }

    /// Add a packed column to unpack into a relation named `name`.
    pub fn relation(mut self, column: impl Into<String>, name: impl Into<String>) -> Self {
        self.relations.push(RelationSpec {
            column: column.into(),
            name: name.into(),
            delimiter: None,
        });
        self
    }

    /// Add a categorical column to factor out into a dimension named `name`.
    pub fn dimension(mut self, column: impl Into<String>, name: impl Into<String>) -> Self {
        self.dimensions.push(DimensionSpec {
            column: column.into(),
            name: name.into(),
        });
        self
    }

    /// Parse a plan from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a plan from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| NormalizeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Name of the junction table produced for a relation.
    pub fn junction_name(&self, relation: &RelationSpec) -> String {
        format!("{}_{}", self.base_name, relation.name)
    }

    /// Name of the key column that replaces values of dimension `name`.
    pub fn key_column(name: &str) -> String {
        format!("{}_{}", name, ID_COLUMN)
    }

    /// Check the plan against a table before running it.
    ///
    /// Every referenced column must exist, packed and categorical columns
    /// must be distinct from the id column and from each other, and every
    /// output table name must be unique. Generated key columns must not
    /// collide with the id column or with any column the base table keeps.
    pub fn validate(&self, table: &DataTable) -> Result<()> {
        table.require_column(&self.id_column)?;
        for column in &self.clean {
            table.require_column(column)?;
        }

        let mut used = HashSet::new();
        let sources = self
            .relations
            .iter()
            .map(|r| r.column.as_str())
            .chain(self.dimensions.iter().map(|d| d.column.as_str()));
        for column in sources {
            table.require_column(column)?;
            if column == self.id_column {
                return Err(NormalizeError::Plan(format!(
                    "id column '{}' cannot be unpacked or factored out",
                    column
                )));
            }
            if !used.insert(column) {
                return Err(NormalizeError::Plan(format!(
                    "column '{}' is listed more than once",
                    column
                )));
            }
        }

        for relation in &self.relations {
            if let Some(delimiter) = relation.delimiter {
                self.config.clone().with_delimiter(delimiter).validate()?;
            }
        }

        let mut names = HashSet::new();
        names.insert(self.base_name.clone());
        let outputs = self
            .relations
            .iter()
            .flat_map(|r| [r.name.clone(), self.junction_name(r)])
            .chain(self.dimensions.iter().map(|d| d.name.clone()));
        for name in outputs {
            if name.is_empty() {
                return Err(NormalizeError::Plan("output table name is empty".to_string()));
            }
            if !names.insert(name.clone()) {
                return Err(NormalizeError::Plan(format!(
                    "output table name '{}' is used more than once",
                    name
                )));
            }
        }

        for relation in &self.relations {
            let key = Self::key_column(&relation.name);
            if key == self.id_column {
                return Err(NormalizeError::Plan(format!(
                    "relation '{}' key column '{}' collides with the id column",
                    relation.name, key
                )));
            }
        }

        let packed: HashSet<&str> = self.relations.iter().map(|r| r.column.as_str()).collect();
        for dimension in &self.dimensions {
            let key = Self::key_column(&dimension.name);
            let taken = table
                .headers
                .iter()
                .any(|h| *h == key && *h != dimension.column && !packed.contains(h.as_str()));
            if taken {
                return Err(NormalizeError::Plan(format!(
                    "dimension '{}' key column '{}' already exists in the table",
                    dimension.name, key
                )));
            }
        }

        Ok(())
    }
}
