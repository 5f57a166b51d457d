//! In-memory table of loaded rows.

use serde_json::{Map, Value};

use crate::error::CheckError;

/// One loaded row, keyed by column name.
pub type Row = Map<String, Value>;

/// Rows loaded for a single table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    rows: Vec<Row>,
}

impl Frame {
    /// Create a frame from JSON values; every value must be an object.
    pub fn from_values(values: Vec<Value>) -> Result<Self, CheckError> {
        let rows = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| match value {
                Value::Object(row) => Ok(row),
                _ => Err(CheckError::InvalidRow(idx)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns true if any row carries the column.
    pub fn has_column(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.contains_key(column))
    }

    /// Ensure a column exists. An empty frame has every column.
    pub fn require_column(&self, table: &str, column: &str) -> Result<(), CheckError> {
        if self.is_empty() || self.has_column(column) {
            Ok(())
        } else {
            Err(CheckError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            })
        }
    }

    /// Rows matching the predicate, cloned.
    pub fn filter<F>(&self, mut predicate: F) -> Vec<Row>
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.iter().filter(|&row| predicate(row)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_values() {
        let frame = Frame::from_values(vec![json!({"id": 1}), json!({"id": 2})]).unwrap();
        assert_eq!(frame.len(), 2);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_from_values_rejects_scalars() {
        let err = Frame::from_values(vec![json!({"id": 1}), json!(5)]).unwrap_err();
        assert!(matches!(err, CheckError::InvalidRow(1)));
    }

    #[test]
    fn test_require_column() {
        let frame = Frame::from_values(vec![json!({"id": 1})]).unwrap();
        assert!(frame.require_column("t", "id").is_ok());
        assert!(matches!(
            frame.require_column("t", "missing"),
            Err(CheckError::MissingColumn { .. })
        ));
        assert!(Frame::default().require_column("t", "missing").is_ok());
    }
}
