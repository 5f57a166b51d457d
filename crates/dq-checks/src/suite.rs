//! Suite definitions: which checks to run against which table.
//!
//! A suite is one JSON document per table:
//!
//! ```json
//! {
//!   "table": "accounts",
//!   "load": { "query": "SELECT * FROM accounts" },
//!   "pk": ["account_id"],
//!   "table_checks": [{ "type": "pk_unique" }],
//!   "columns": {
//!     "status": { "checks": [{ "type": "in_set", "values": ["OPEN", "CLOSED"] }] }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CheckError;
use crate::result::CheckLevel;

/// Checks for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    /// Table name, used in results and the default load query.
    pub table: String,

    /// How to load the rows.
    #[serde(default)]
    pub load: LoadConfig,

    /// Primary key columns.
    #[serde(default)]
    pub pk: Vec<String>,

    /// Checks over the whole table.
    #[serde(default)]
    pub table_checks: Vec<CheckSpec>,

    /// Per-column checks, in file order.
    #[serde(default)]
    pub columns: IndexMap<String, ColumnConfig>,
}

/// Load configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Custom SQL; defaults to selecting every row of the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Checks for one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default)]
    pub checks: Vec<CheckSpec>,
}

/// A single check and its parameters, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckSpec {
    RowCountMin {
        #[serde(default = "default_row_count_min")]
        min: i64,
    },
    RowCountBetween {
        #[serde(default)]
        min: i64,
        #[serde(default = "default_upper_bound")]
        max: i64,
    },
    PkNotNull {},
    PkUnique {},
    NotNull {},
    InSet {
        values: Vec<serde_json::Value>,
    },
    Regex {
        pattern: String,
    },
    LengthBetween {
        #[serde(default)]
        min: usize,
        #[serde(default = "default_length_max")]
        max: usize,
    },
    NumericMin {
        #[serde(default)]
        min: f64,
    },
    NumericMax {
        #[serde(default = "default_numeric_max")]
        max: f64,
    },
    TimestampNotInFuture {},
    Boolean {},
    ConditionalRequired {
        when_column: String,
        when_value: serde_json::Value,
        required_column: String,
    },
}

fn default_row_count_min() -> i64 {
    1
}

fn default_upper_bound() -> i64 {
    1_000_000_000_000
}

fn default_length_max() -> usize {
    1_000_000
}

fn default_numeric_max() -> f64 {
    1e12
}

impl CheckSpec {
    /// Check kind as written in suite files.
    pub fn name(&self) -> &'static str {
        match self {
            CheckSpec::RowCountMin { .. } => "row_count_min",
            CheckSpec::RowCountBetween { .. } => "row_count_between",
            CheckSpec::PkNotNull {} => "pk_not_null",
            CheckSpec::PkUnique {} => "pk_unique",
            CheckSpec::NotNull {} => "not_null",
            CheckSpec::InSet { .. } => "in_set",
            CheckSpec::Regex { .. } => "regex",
            CheckSpec::LengthBetween { .. } => "length_between",
            CheckSpec::NumericMin { .. } => "numeric_min",
            CheckSpec::NumericMax { .. } => "numeric_max",
            CheckSpec::TimestampNotInFuture {} => "timestamp_not_in_future",
            CheckSpec::Boolean {} => "boolean",
            CheckSpec::ConditionalRequired { .. } => "conditional_required",
        }
    }

    /// Scope the check is evaluated at.
    pub fn level(&self) -> CheckLevel {
        match self {
            CheckSpec::RowCountMin { .. }
            | CheckSpec::RowCountBetween { .. }
            | CheckSpec::PkNotNull {}
            | CheckSpec::PkUnique {} => CheckLevel::Table,
            _ => CheckLevel::Column,
        }
    }
}

impl Suite {
    /// Parse and validate a suite from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CheckError> {
        let suite: Suite = serde_json::from_str(text)?;
        suite.validate()?;
        Ok(suite)
    }

    /// SQL used to load the table's rows.
    pub fn load_query(&self) -> String {
        match self.load.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => query.to_string(),
            _ => format!("SELECT * FROM {}", self.table),
        }
    }

    /// Total number of checks the suite will produce.
    pub fn check_count(&self) -> usize {
        self.table_checks.len()
            + self
                .columns
                .values()
                .map(|column| column.checks.len())
                .sum::<usize>()
    }

    /// Reject suites that cannot be evaluated.
    pub fn validate(&self) -> Result<(), CheckError> {
        if self.table.trim().is_empty() {
            return Err(CheckError::InvalidSuite("table name is empty".to_string()));
        }

        if let Some(spec) = self
            .table_checks
            .iter()
            .find(|spec| spec.level() == CheckLevel::Column)
        {
            return Err(CheckError::ColumnCheckAtTableLevel {
                table: self.table.clone(),
                check: spec.name().to_string(),
            });
        }

        let all_checks = self
            .table_checks
            .iter()
            .chain(self.columns.values().flat_map(|column| column.checks.iter()));
        for spec in all_checks {
            match spec {
                CheckSpec::Regex { pattern } => {
                    crate::checks::compile_prefix_pattern(pattern)?;
                }
                CheckSpec::RowCountBetween { min, max } if min > max => {
                    return Err(CheckError::InvalidSuite(format!(
                        "row_count_between on '{}' has min {} greater than max {}",
                        self.table, min, max
                    )));
                }
                CheckSpec::LengthBetween { min, max } if min > max => {
                    return Err(CheckError::InvalidSuite(format!(
                        "length_between on '{}' has min {} greater than max {}",
                        self.table, min, max
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
