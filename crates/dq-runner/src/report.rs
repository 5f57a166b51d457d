//! Report rendering and writing.
//!
//! The run summary is rendered to HTML with minijinja and written next to a
//! pretty-printed JSON copy (`last_run_details.json`).

use chrono::Utc;
use dq_checks::RunSummary;
use minijinja::{Environment, Error, ErrorKind, Value};
use std::path::{Path, PathBuf};

use crate::error::RunnerResult;

/// Name of the JSON details file.
pub const DETAILS_FILE: &str = "last_run_details.json";

const REPORT_TEMPLATE: &str = "report.html";

const BUILTIN_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report renderer.
pub struct ReportRenderer {
    env: Environment<'static>,
}

impl ReportRenderer {
    /// Renderer using the built-in template.
    pub fn new() -> RunnerResult<Self> {
        Self::from_source(BUILTIN_TEMPLATE.to_string())
    }

    /// Renderer using a custom template source.
    pub fn from_source(source: String) -> RunnerResult<Self> {
        let mut env = Environment::new();
        env.add_filter("tojson_pretty", filter_tojson_pretty);
        env.add_template_owned(REPORT_TEMPLATE, source)?;
        Ok(Self { env })
    }

    /// Renderer using a template file.
    pub fn from_file(path: &Path) -> RunnerResult<Self> {
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(template = %path.display(), "Using custom report template");
        Self::from_source(source)
    }

    /// Renderer from an optional template path.
    pub fn with_template(path: Option<&Path>) -> RunnerResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::new(),
        }
    }

    /// Render the summary to HTML.
    pub fn render(&self, summary: &RunSummary) -> RunnerResult<String> {
        let tmpl = self.env.get_template(REPORT_TEMPLATE)?;
        Ok(tmpl.render(Value::from_serialize(summary))?)
    }
}

/// Pretty JSON encoding filter.
fn filter_tojson_pretty(value: &Value) -> Result<String, Error> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("tojson error: {}", e)))
}

/// File name of the HTML report for a run started now.
pub fn report_file_name() -> String {
    format!("report_{}.html", Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Write the HTML report and the JSON details into `output_dir`.
///
/// Returns the path of the HTML report.
pub fn write_reports(
    summary: &RunSummary,
    output_dir: &Path,
    renderer: &ReportRenderer,
) -> RunnerResult<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let html = renderer.render(summary)?;
    let report_path = output_dir.join(report_file_name());
    std::fs::write(&report_path, html)?;

    let details_path = output_dir.join(DETAILS_FILE);
    std::fs::write(&details_path, serde_json::to_string_pretty(summary)?)?;

    tracing::info!(
        report = %report_path.display(),
        details = %details_path.display(),
        "Reports written"
    );

    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_checks::CheckResult;
    use serde_json::json;

    fn sample_summary() -> RunSummary {
        let failing = CheckResult::column("in_set", "accounts", "status")
            .with_failures(vec![json!({"status": "<FROZEN>"}).as_object().cloned().unwrap()])
            .with_details("allowed=[\"CLOSED\",\"OPEN\"]");
        let passing = CheckResult::table("row_count_min", "accounts")
            .with_passed(true)
            .with_details("rows=3, min=1");
        RunSummary::build(vec![passing, failing])
    }

    #[test]
    fn test_builtin_template_renders() {
        let html = ReportRenderer::new().unwrap().render(&sample_summary()).unwrap();
        assert!(html.contains("Data Quality Report"));
        assert!(html.contains("accounts"));
        assert!(html.contains("50%") || html.contains("50.0%"));
        assert!(html.contains("FAIL"));
        // Row values are HTML-escaped.
        assert!(html.contains("&lt;FROZEN&gt;"));
        assert!(!html.contains("<FROZEN>"));
    }

    #[test]
    fn test_custom_template() {
        let renderer =
            ReportRenderer::from_source("{{ total_checks }}/{{ failed_checks }}".to_string())
                .unwrap();
        assert_eq!(renderer.render(&sample_summary()).unwrap(), "2/1");
    }

    #[test]
    fn test_invalid_template_rejected() {
        assert!(ReportRenderer::from_source("{% for %}".to_string()).is_err());
    }

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("output");
        let summary = sample_summary();

        let report = write_reports(&summary, &output, &ReportRenderer::new().unwrap()).unwrap();
        assert!(report.exists());
        let name = report.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("report_") && name.ends_with(".html"));

        let details = std::fs::read_to_string(output.join(DETAILS_FILE)).unwrap();
        assert!(details.contains("\n  \"run_at\""));
        let parsed: RunSummary = serde_json::from_str(&details).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn test_report_file_name_format() {
        let name = report_file_name();
        assert_eq!(name.len(), "report_20240101_120000.html".len());
    }
}
