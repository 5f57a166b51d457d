//! Table loading.
//!
//! Rows are fetched as `row_to_json` objects so PostgreSQL performs the type
//! conversion: numerics become JSON numbers, timestamps ISO-8601 strings and
//! NULL becomes `null`.

use dq_checks::Frame;
use std::time::Instant;

use super::Engine;
use crate::error::RunnerResult;

/// Wrap a user query so each row comes back as one JSON object.
pub fn wrap_query(query: &str) -> String {
    let trimmed = query.trim().trim_end_matches(';').trim_end();
    format!("SELECT row_to_json(dq_row) FROM ({}) AS dq_row", trimmed)
}

/// Load the rows returned by `query`.
pub async fn load_table(engine: &Engine, query: &str) -> RunnerResult<Frame> {
    let pool = engine.pool().await?;
    let sql = wrap_query(query);
    let start = Instant::now();

    let rows = sqlx::query_scalar::<_, serde_json::Value>(&sql).fetch_all(pool).await?;
    let frame = Frame::from_values(rows)?;

    tracing::debug!(
        query = %query,
        rows = frame.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Table loaded"
    );

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_query() {
        assert_eq!(
            wrap_query("SELECT * FROM accounts"),
            "SELECT row_to_json(dq_row) FROM (SELECT * FROM accounts) AS dq_row"
        );
    }

    #[test]
    fn test_wrap_query_strips_terminator() {
        assert_eq!(
            wrap_query("  SELECT id FROM tx WHERE amount > 0 ;\n"),
            "SELECT row_to_json(dq_row) FROM (SELECT id FROM tx WHERE amount > 0) AS dq_row"
        );
    }

    #[tokio::test]
    async fn test_load_table_reports_bad_url() {
        let engine = Engine::new("not-a-url", Default::default());
        let err = load_table(&engine, "SELECT 1").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::RunnerError::InvalidDatabaseUrl { .. }
        ));
    }
}
