//! Check result types.

use serde::{Deserialize, Serialize};

use crate::frame::Row;

/// Maximum number of failing rows kept on a result.
pub const FAILED_SAMPLE_LIMIT: usize = 100;

/// Scope a check applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckLevel {
    /// Check over the table as a whole.
    Table,
    /// Check over the values of one column.
    Column,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckLevel::Table => write!(f, "table"),
            CheckLevel::Column => write!(f, "column"),
        }
    }
}

/// Outcome of one check against one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check passed.
    pub passed: bool,

    /// Check kind (e.g., "not_null").
    pub check_name: String,

    /// Table or column scope.
    pub level: CheckLevel,

    /// Table the check ran against.
    pub table: String,

    /// Column the check ran against, for column checks.
    pub column: Option<String>,

    /// Human-readable parameters or observations.
    #[serde(default)]
    pub details: String,

    /// Up to [`FAILED_SAMPLE_LIMIT`] failing rows.
    #[serde(default)]
    pub failed_sample: Vec<Row>,

    /// Total number of failing rows.
    #[serde(default)]
    pub failed_count: usize,
}

impl CheckResult {
    /// Create a passing table-level result.
    pub fn table(check_name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            passed: true,
            check_name: check_name.into(),
            level: CheckLevel::Table,
            table: table.into(),
            column: None,
            details: String::new(),
            failed_sample: Vec::new(),
            failed_count: 0,
        }
    }

    /// Create a passing column-level result.
    pub fn column(
        check_name: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self {
            level: CheckLevel::Column,
            column: Some(column.into()),
            ..Self::table(check_name, table)
        }
    }

    /// Set the details string.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Set the pass/fail flag directly (checks without failing rows).
    pub fn with_passed(mut self, passed: bool) -> Self {
        self.passed = passed;
        self
    }

    /// Record failing rows; the check passes only if there are none.
    pub fn with_failures(mut self, mut failed: Vec<Row>) -> Self {
        self.passed = failed.is_empty();
        self.failed_count = failed.len();
        failed.truncate(FAILED_SAMPLE_LIMIT);
        self.failed_sample = failed;
        self
    }
}
