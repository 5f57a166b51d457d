//! Failure logging for per-table pipeline stages.

use std::fmt::Display;

/// Logs a failed stage of a table run before the error is propagated.
pub trait ResultExt<T, E> {
    /// Record `table`, `stage` and the caller location when this is an `Err`.
    ///
    /// ```ignore
    /// let frame = load_table(&engine, &query).await.log_stage(&suite.table, "load")?;
    /// ```
    fn log_stage(self, table: &str, stage: &'static str) -> Result<T, E>;
}

impl<T, E: Display> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn log_stage(self, table: &str, stage: &'static str) -> Result<T, E> {
        if let Err(ref e) = self {
            let location = std::panic::Location::caller();
            tracing::error!(
                target: "dq_runner",
                table,
                stage,
                error = %e,
                at = %format!("{}:{}", location.file(), location.line()),
                "Table run failed"
            );
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_stage_passes_ok_through() {
        let result: Result<usize, String> = Ok(3);
        assert_eq!(result.log_stage("accounts", "load").unwrap(), 3);
    }

    #[test]
    fn test_log_stage_keeps_error() {
        let result: Result<usize, String> = Err("relation does not exist".to_string());
        let err = result.log_stage("accounts", "evaluate").unwrap_err();
        assert_eq!(err, "relation does not exist");
    }
}
