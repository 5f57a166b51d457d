//! Suite execution: load each table and evaluate its checks.

use dq_checks::{evaluate_suite, CheckResult, Suite};

use crate::db::{load_table, Engine};
use crate::error::RunnerResult;
use crate::result_ext::ResultExt;

/// Load the suite's table and run all of its checks.
pub async fn run_suite(engine: &Engine, suite: &Suite) -> RunnerResult<Vec<CheckResult>> {
    let query = suite.load_query();
    let frame = load_table(engine, &query)
        .await
        .log_stage(&suite.table, "load")?;

    let results = evaluate_suite(&frame, suite).log_stage(&suite.table, "evaluate")?;

    let failed = results.iter().filter(|r| !r.passed).count();
    tracing::info!(
        table = %suite.table,
        rows = frame.len(),
        checks = results.len(),
        failed,
        "Table checked"
    );

    Ok(results)
}

/// Run suites in order, concatenating their results.
///
/// Stops at the first suite that cannot be loaded or evaluated.
pub async fn run_all(engine: &Engine, suites: &[Suite]) -> RunnerResult<Vec<CheckResult>> {
    let mut all_results = Vec::new();
    for suite in suites {
        all_results.extend(run_suite(engine, suite).await?);
    }
    Ok(all_results)
}
