//! Check implementations and dispatch.
//!
//! Table checks look at the frame as a whole; column checks look at the
//! values of one column. [`evaluate_suite`] runs every check a suite lists,
//! table checks first, then each column's checks in file order.

pub mod column;
pub mod table;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::CheckError;
use crate::frame::Frame;
use crate::result::{CheckLevel, CheckResult};
use crate::suite::{CheckSpec, Suite};

/// Compile a pattern so that it must match at the start of the value.
pub fn compile_prefix_pattern(pattern: &str) -> Result<Regex, CheckError> {
    Regex::new(&format!("^(?:{})", pattern)).map_err(|e| CheckError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Evaluate a table-level check.
pub fn evaluate_table_check(
    frame: &Frame,
    suite: &Suite,
    spec: &CheckSpec,
) -> Result<CheckResult, CheckError> {
    let table = suite.table.as_str();
    match spec {
        CheckSpec::RowCountMin { min } => Ok(table::row_count_min(frame, table, *min)),
        CheckSpec::RowCountBetween { min, max } => {
            Ok(table::row_count_between(frame, table, *min, *max))
        }
        CheckSpec::PkNotNull {} => table::pk_not_null(frame, table, &suite.pk),
        CheckSpec::PkUnique {} => table::pk_unique(frame, table, &suite.pk),
        other => Err(CheckError::ColumnCheckAtTableLevel {
            table: table.to_string(),
            check: other.name().to_string(),
        }),
    }
}

/// Evaluate a check listed under a column.
///
/// Table-level kinds listed under a column run as table checks.
pub fn evaluate_column_check(
    frame: &Frame,
    suite: &Suite,
    column: &str,
    spec: &CheckSpec,
    now: DateTime<Utc>,
) -> Result<CheckResult, CheckError> {
    let table = suite.table.as_str();
    match spec {
        CheckSpec::ConditionalRequired {
            when_column,
            required_column,
            ..
        } => {
            frame.require_column(table, when_column)?;
            frame.require_column(table, required_column)?;
        }
        _ if spec.level() == CheckLevel::Column => frame.require_column(table, column)?,
        _ => {}
    }

    let result = match spec {
        CheckSpec::RowCountMin { .. }
        | CheckSpec::RowCountBetween { .. }
        | CheckSpec::PkNotNull {}
        | CheckSpec::PkUnique {} => evaluate_table_check(frame, suite, spec)?,
        CheckSpec::NotNull {} => column::not_null(frame, table, column),
        CheckSpec::InSet { values } => column::in_set(frame, table, column, values),
        CheckSpec::Regex { pattern } => column::regex(frame, table, column, pattern)?,
        CheckSpec::LengthBetween { min, max } => {
            column::length_between(frame, table, column, *min, *max)
        }
        CheckSpec::NumericMin { min } => column::numeric_min(frame, table, column, *min),
        CheckSpec::NumericMax { max } => column::numeric_max(frame, table, column, *max),
        CheckSpec::TimestampNotInFuture {} => {
            column::timestamp_not_in_future(frame, table, column, now)
        }
        CheckSpec::Boolean {} => column::boolean(frame, table, column),
        CheckSpec::ConditionalRequired {
            when_column,
            when_value,
            required_column,
        } => column::conditional_required(frame, table, when_column, when_value, required_column),
    };
    Ok(result)
}

/// Run every check in a suite against the loaded frame.
pub fn evaluate_suite(frame: &Frame, suite: &Suite) -> Result<Vec<CheckResult>, CheckError> {
    let now = Utc::now();
    let mut results = Vec::with_capacity(suite.check_count());

    for spec in &suite.table_checks {
        let result = evaluate_table_check(frame, suite, spec)?;
        log_result(&result);
        results.push(result);
    }

    for (column, config) in &suite.columns {
        for spec in &config.checks {
            let result = evaluate_column_check(frame, suite, column, spec, now)?;
            log_result(&result);
            results.push(result);
        }
    }

    Ok(results)
}

fn log_result(result: &CheckResult) {
    tracing::debug!(
        table = %result.table,
        column = ?result.column,
        check = %result.check_name,
        passed = result.passed,
        failed_count = result.failed_count,
        "Check evaluated"
    );
}
