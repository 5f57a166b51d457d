//! Table-level checks.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::CheckError;
use crate::frame::{Frame, Row};
use crate::result::CheckResult;
use crate::value::{compare, is_null};

/// Passes when the table has at least `min` rows.
pub fn row_count_min(frame: &Frame, table: &str, min: i64) -> CheckResult {
    let rows = frame.len() as i64;
    CheckResult::table("row_count_min", table)
        .with_passed(rows >= min)
        .with_details(format!("rows={}, min={}", rows, min))
}

/// Passes when the row count lies within `[min, max]`.
pub fn row_count_between(frame: &Frame, table: &str, min: i64, max: i64) -> CheckResult {
    let rows = frame.len() as i64;
    CheckResult::table("row_count_between", table)
        .with_passed(rows >= min && rows <= max)
        .with_details(format!("rows={}, range=[{}, {}]", rows, min, max))
}

/// Fails for rows with a null in any primary key column.
pub fn pk_not_null(frame: &Frame, table: &str, pk: &[String]) -> Result<CheckResult, CheckError> {
    for column in pk {
        frame.require_column(table, column)?;
    }
    let failed = frame.filter(|row| pk.iter().any(|column| is_null(row.get(column))));
    Ok(CheckResult::table("pk_not_null", table).with_failures(failed))
}

/// Fails for every row whose primary key tuple occurs more than once.
///
/// Failing rows are ordered by the key columns.
pub fn pk_unique(frame: &Frame, table: &str, pk: &[String]) -> Result<CheckResult, CheckError> {
    if pk.is_empty() {
        return Ok(CheckResult::table("pk_unique", table).with_details("no primary key configured"));
    }
    for column in pk {
        frame.require_column(table, column)?;
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in frame.rows() {
        *counts.entry(key_of(row, pk)).or_insert(0) += 1;
    }

    let mut failed = frame.filter(|row| counts.get(&key_of(row, pk)).copied().unwrap_or(0) > 1);
    failed.sort_by(|a, b| {
        pk.iter()
            .map(|column| {
                compare(
                    a.get(column).unwrap_or(&Value::Null),
                    b.get(column).unwrap_or(&Value::Null),
                )
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(CheckResult::table("pk_unique", table).with_failures(failed))
}

/// Largest magnitude at which every integral `f64` is exact.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Hashable identity of a row's key. Integers are keyed by their exact
/// digits; integral floats join them so that `1` and `1.0` collide.
fn key_of(row: &Row, pk: &[String]) -> String {
    pk.iter()
        .map(|column| match row.get(column) {
            None | Some(Value::Null) => "null".to_string(),
            Some(Value::Number(n)) if !n.is_f64() => format!("n:{}", n),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT => {
                    format!("n:{}", f as i64)
                }
                _ => format!("n:{}", n),
            },
            Some(other) => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\u{1f}")
}
