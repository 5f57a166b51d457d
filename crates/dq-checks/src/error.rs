//! Check evaluation error types.

use thiserror::Error;

/// Errors that can occur while parsing suites or evaluating checks.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A column check references a column the loaded rows do not have.
    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    /// A regex check carries a pattern that does not compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A column-level check was listed under `table_checks`.
    #[error("Check '{check}' is column-level and cannot run as a table check on '{table}'")]
    ColumnCheckAtTableLevel { table: String, check: String },

    /// Suite definition could not be parsed or is inconsistent.
    #[error("Invalid suite: {0}")]
    InvalidSuite(String),

    /// A loaded row was not a JSON object.
    #[error("Row {0} is not an object")]
    InvalidRow(usize),
}

impl From<serde_json::Error> for CheckError {
    fn from(e: serde_json::Error) -> Self {
        CheckError::InvalidSuite(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheckError::MissingColumn {
            table: "accounts".to_string(),
            column: "status".to_string(),
        };
        assert_eq!(err.to_string(), "Column 'status' not found in table 'accounts'");

        let err = CheckError::InvalidRow(3);
        assert_eq!(err.to_string(), "Row 3 is not an object");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CheckError = json_err.into();
        assert!(matches!(err, CheckError::InvalidSuite(_)));
    }
}
