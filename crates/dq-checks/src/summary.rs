//! Run summary aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::CheckResult;

/// Timestamp format of [`RunSummary::run_at`].
pub const RUN_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Per-table tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Aggregated outcome of a run, the data behind both reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the summary was built.
    pub run_at: String,

    /// Tables in the order their first result appeared.
    pub tables: Vec<TableSummary>,

    pub total_tables: usize,
    pub total_checks: usize,
    pub passed_checks: usize,
    pub failed_checks: usize,

    /// Percentage of passed checks, rounded to two decimals.
    pub pass_rate: f64,

    /// Every individual result.
    pub checks: Vec<CheckResult>,
}

impl RunSummary {
    /// Build a summary stamped with the current time.
    pub fn build(results: Vec<CheckResult>) -> Self {
        Self::build_at(results, Utc::now())
    }

    /// Build a summary stamped with `run_at`.
    pub fn build_at(results: Vec<CheckResult>, run_at: DateTime<Utc>) -> Self {
        let mut tables: Vec<TableSummary> = Vec::new();
        for result in &results {
            let idx = match tables.iter().position(|t| t.name == result.table) {
                Some(idx) => idx,
                None => {
                    tables.push(TableSummary {
                        name: result.table.clone(),
                        total: 0,
                        passed: 0,
                        failed: 0,
                    });
                    tables.len() - 1
                }
            };
            let entry = &mut tables[idx];
            entry.total += 1;
            if result.passed {
                entry.passed += 1;
            } else {
                entry.failed += 1;
            }
        }

        let total_checks = results.len();
        let passed_checks = results.iter().filter(|r| r.passed).count();
        let failed_checks = total_checks - passed_checks;
        let pass_rate = if total_checks > 0 {
            let rate = passed_checks as f64 / total_checks as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            run_at: run_at.format(RUN_AT_FORMAT).to_string(),
            total_tables: tables.len(),
            tables,
            total_checks,
            passed_checks,
            failed_checks,
            pass_rate,
            checks: results,
        }
    }

    /// Returns true if any check failed.
    pub fn has_failures(&self) -> bool {
        self.failed_checks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(table: &str, passed: bool) -> CheckResult {
        CheckResult::table("row_count_min", table).with_passed(passed)
    }

    #[test]
    fn test_build_summary() {
        let run_at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let summary = RunSummary::build_at(
            vec![
                result("customers", true),
                result("accounts", false),
                result("customers", false),
            ],
            run_at,
        );

        assert_eq!(summary.run_at, "2024-05-06 07:08:09 UTC");
        assert_eq!(summary.total_tables, 2);
        assert_eq!(summary.total_checks, 3);
        assert_eq!(summary.passed_checks, 1);
        assert_eq!(summary.failed_checks, 2);
        assert_eq!(summary.pass_rate, 33.33);
        assert!(summary.has_failures());

        assert_eq!(summary.tables[0].name, "customers");
        assert_eq!(summary.tables[0].total, 2);
        assert_eq!(summary.tables[0].passed, 1);
        assert_eq!(summary.tables[0].failed, 1);
        assert_eq!(summary.tables[1].name, "accounts");
        assert_eq!(summary.tables[1].failed, 1);
        assert_eq!(summary.checks.len(), 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::build(Vec::new());
        assert_eq!(summary.total_checks, 0);
        assert_eq!(summary.pass_rate, 0.0);
        assert!(summary.tables.is_empty());
        assert!(!summary.has_failures());
        assert!(summary.run_at.ends_with(" UTC"));
    }

    #[test]
    fn test_pass_rate_rounding() {
        let results = vec![result("t", true), result("t", true), result("t", false)];
        let summary = RunSummary::build(results);
        assert_eq!(summary.pass_rate, 66.67);
    }
}
