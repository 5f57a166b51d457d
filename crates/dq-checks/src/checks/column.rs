//! Column-level checks.
//!
//! Null cells never fail a value check; only `not_null` and
//! `conditional_required` look at nulls.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::compile_prefix_pattern;
use crate::error::CheckError;
use crate::frame::{Frame, Row};
use crate::result::CheckResult;
use crate::value::{as_number, compare, is_null, loose_eq, parse_timestamp, to_text};

/// Rows matching `failing` among those with a non-null value in `column`.
fn failing_values<F>(frame: &Frame, column: &str, mut failing: F) -> Vec<Row>
where
    F: FnMut(&Value) -> bool,
{
    frame.filter(|row| match row.get(column) {
        Some(value) if !value.is_null() => failing(value),
        _ => false,
    })
}

pub fn not_null(frame: &Frame, table: &str, column: &str) -> CheckResult {
    let failed = frame.filter(|row| is_null(row.get(column)));
    CheckResult::column("not_null", table, column).with_failures(failed)
}

/// Fails for values outside the allowed set.
pub fn in_set(frame: &Frame, table: &str, column: &str, allowed: &[Value]) -> CheckResult {
    let failed = failing_values(frame, column, |value| {
        !allowed.iter().any(|candidate| loose_eq(candidate, value))
    });

    let mut sorted: Vec<Value> = allowed.to_vec();
    sorted.sort_by(compare);
    sorted.dedup_by(|a, b| loose_eq(a, b));
    let allowed_text = serde_json::to_string(&sorted).unwrap_or_default();

    CheckResult::column("in_set", table, column)
        .with_failures(failed)
        .with_details(format!("allowed={}", allowed_text))
}

/// Fails for values whose text does not start with a match of `pattern`.
pub fn regex(
    frame: &Frame,
    table: &str,
    column: &str,
    pattern: &str,
) -> Result<CheckResult, CheckError> {
    let re = compile_prefix_pattern(pattern)?;
    let failed = failing_values(frame, column, |value| !re.is_match(&to_text(value)));
    Ok(CheckResult::column("regex", table, column)
        .with_failures(failed)
        .with_details(format!("pattern={}", pattern)))
}

/// Fails for values whose text length in characters is outside `[min, max]`.
pub fn length_between(
    frame: &Frame,
    table: &str,
    column: &str,
    min: usize,
    max: usize,
) -> CheckResult {
    let failed = failing_values(frame, column, |value| {
        let len = to_text(value).chars().count();
        len < min || len > max
    });
    CheckResult::column("length_between", table, column)
        .with_failures(failed)
        .with_details(format!("range=[{},{}]", min, max))
}

/// Fails for values below `min`, and for values that are not numeric.
pub fn numeric_min(frame: &Frame, table: &str, column: &str, min: f64) -> CheckResult {
    let failed = failing_values(frame, column, |value| match as_number(value) {
        Some(n) => n < min,
        None => true,
    });
    CheckResult::column("numeric_min", table, column)
        .with_failures(failed)
        .with_details(format!("min={}", min))
}

/// Fails for values above `max`, and for values that are not numeric.
pub fn numeric_max(frame: &Frame, table: &str, column: &str, max: f64) -> CheckResult {
    let failed = failing_values(frame, column, |value| match as_number(value) {
        Some(n) => n > max,
        None => true,
    });
    CheckResult::column("numeric_max", table, column)
        .with_failures(failed)
        .with_details(format!("max={}", max))
}

/// Fails for timestamps later than `now`. Unparseable values are ignored.
pub fn timestamp_not_in_future(
    frame: &Frame,
    table: &str,
    column: &str,
    now: DateTime<Utc>,
) -> CheckResult {
    let failed = failing_values(frame, column, |value| {
        parse_timestamp(value).is_some_and(|ts| ts > now)
    });
    CheckResult::column("timestamp_not_in_future", table, column).with_failures(failed)
}

/// Fails for values that are neither booleans nor the numbers 0 and 1.
pub fn boolean(frame: &Frame, table: &str, column: &str) -> CheckResult {
    let failed = failing_values(frame, column, |value| match value {
        Value::Bool(_) => false,
        Value::Number(_) => !matches!(as_number(value), Some(n) if n == 0.0 || n == 1.0),
        _ => true,
    });
    CheckResult::column("boolean", table, column).with_failures(failed)
}

/// Fails for rows where `when_column` equals `when_value` but
/// `required_column` is null.
pub fn conditional_required(
    frame: &Frame,
    table: &str,
    when_column: &str,
    when_value: &Value,
    required_column: &str,
) -> CheckResult {
    let failed = frame.filter(|row| {
        row.get(when_column)
            .is_some_and(|value| loose_eq(value, when_value))
            && is_null(row.get(required_column))
    });
    CheckResult::column("conditional_required", table, required_column)
        .with_failures(failed)
        .with_details(format!(
            "when {}={}, {} must NOT NULL",
            when_column,
            to_text(when_value),
            required_column
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn frame(rows: Value) -> Frame {
        Frame::from_values(rows.as_array().cloned().unwrap()).unwrap()
    }

    #[test]
    fn test_not_null() {
        let f = frame(json!([{"c": 1}, {"c": null}, {"c": ""}]));
        let result = not_null(&f, "t", "c");
        assert!(!result.passed);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.column.as_deref(), Some("c"));
    }

    #[test]
    fn test_in_set_ignores_nulls_and_sorts_details() {
        let f = frame(json!([
            {"c": "OPEN"},
            {"c": "PENDING"},
            {"c": null},
            {"c": "CLOSED"}
        ]));
        let result = in_set(&f, "t", "c", &[json!("OPEN"), json!("CLOSED"), json!("OPEN")]);
        assert!(!result.passed);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.failed_sample[0]["c"], json!("PENDING"));
        assert_eq!(result.details, r#"allowed=["CLOSED","OPEN"]"#);
    }

    #[test]
    fn test_in_set_numeric_values() {
        let f = frame(json!([{"c": 1}, {"c": 2.0}, {"c": 3}]));
        let result = in_set(&f, "t", "c", &[json!(1.0), json!(2)]);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.failed_sample[0]["c"], json!(3));
    }

    #[test]
    fn test_in_set_bigint_values() {
        let f = frame(json!([{"c": 9_007_199_254_740_993_i64}]));
        let result = in_set(&f, "t", "c", &[json!(9_007_199_254_740_992_i64)]);
        assert!(!result.passed);
        assert_eq!(result.failed_count, 1);

        let result = in_set(&f, "t", "c", &[json!(9_007_199_254_740_993_i64)]);
        assert!(result.passed);
    }

    #[test]
    fn test_regex_prefix_match() {
        let f = frame(json!([
            {"iban": "DE89370400440532013000"},
            {"iban": "xDE89"},
            {"iban": null},
            {"iban": 12345}
        ]));
        let result = regex(&f, "t", "iban", "[A-Z]{2}\\d{2}").unwrap();
        assert_eq!(result.failed_count, 2);
        assert_eq!(result.details, "pattern=[A-Z]{2}\\d{2}");

        let digits = regex(&f, "t", "iban", "\\d+").unwrap();
        assert_eq!(digits.failed_count, 2);
    }

    #[test]
    fn test_regex_invalid_pattern() {
        let f = frame(json!([{"c": "a"}]));
        assert!(matches!(
            regex(&f, "t", "c", "[unclosed"),
            Err(CheckError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_length_between_counts_characters() {
        let f = frame(json!([{"c": "abc"}, {"c": "ä"}, {"c": "toolong"}, {"c": null}]));
        let result = length_between(&f, "t", "c", 1, 3);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.failed_sample[0]["c"], json!("toolong"));
        assert_eq!(result.details, "range=[1,3]");
    }

    #[test]
    fn test_numeric_min_and_max() {
        let f = frame(json!([
            {"amount": -5},
            {"amount": 0},
            {"amount": "12.5"},
            {"amount": 1500},
            {"amount": "n/a"},
            {"amount": null}
        ]));

        let result = numeric_min(&f, "t", "amount", 0.0);
        assert_eq!(result.failed_count, 2);
        assert_eq!(result.details, "min=0");

        let result = numeric_max(&f, "t", "amount", 1000.0);
        assert_eq!(result.failed_count, 2);
        assert_eq!(result.details, "max=1000");
    }

    #[test]
    fn test_timestamp_not_in_future() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let f = frame(json!([
            {"ts": "2024-06-01T11:59:59+00:00"},
            {"ts": "2024-06-01T12:00:01Z"},
            {"ts": "2030-01-01"},
            {"ts": "not a date"},
            {"ts": null}
        ]));
        let result = timestamp_not_in_future(&f, "t", "ts", now);
        assert_eq!(result.failed_count, 2);
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_boolean() {
        let f = frame(json!([
            {"flag": true},
            {"flag": false},
            {"flag": 1},
            {"flag": 0},
            {"flag": 2},
            {"flag": "true"},
            {"flag": null}
        ]));
        let result = boolean(&f, "t", "flag");
        assert_eq!(result.failed_count, 2);
    }

    #[test]
    fn test_conditional_required() {
        let f = frame(json!([
            {"status": "CLOSED", "closed_at": null},
            {"status": "CLOSED", "closed_at": "2024-01-01"},
            {"status": "OPEN", "closed_at": null}
        ]));
        let result = conditional_required(&f, "t", "status", &json!("CLOSED"), "closed_at");
        assert!(!result.passed);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.column.as_deref(), Some("closed_at"));
        assert_eq!(result.details, "when status=CLOSED, closed_at must NOT NULL");
    }
}
