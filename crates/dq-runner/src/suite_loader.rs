//! Discovery and parsing of suite files.

use dq_checks::Suite;
use std::path::{Path, PathBuf};

use crate::error::{RunnerError, RunnerResult};

/// Paths of all `*.json` files directly inside `dir`, sorted by name.
pub fn suite_paths(dir: &Path) -> RunnerResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RunnerError::Config(format!(
            "Suite directory not found: {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse one suite file.
pub fn load_suite(path: &Path) -> RunnerResult<Suite> {
    let text = std::fs::read_to_string(path)?;
    Suite::from_json(&text).map_err(|e| {
        RunnerError::Config(format!("Failed to load suite {}: {}", path.display(), e))
    })
}

/// Parse every suite in `dir`.
pub fn load_suites(dir: &Path) -> RunnerResult<Vec<Suite>> {
    let suites = suite_paths(dir)?
        .iter()
        .map(|path| load_suite(path))
        .collect::<RunnerResult<Vec<_>>>()?;

    tracing::info!(
        dir = %dir.display(),
        suites = suites.len(),
        "Suites loaded"
    );

    Ok(suites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_suites_sorted_json_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_accounts.json"), r#"{"table": "accounts"}"#).unwrap();
        fs::write(dir.path().join("a_customers.json"), r#"{"table": "customers"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let suites = load_suites(dir.path()).unwrap();
        let tables: Vec<&str> = suites.iter().map(|s| s.table.as_str()).collect();
        assert_eq!(tables, vec!["customers", "accounts"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_suites(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, RunnerError::Config(_)));
    }

    #[test]
    fn test_bad_suite_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), r#"{"table": "t", "table_checks": [{"type": "nope"}]}"#)
            .unwrap();
        let err = load_suites(dir.path()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_bundled_suites_parse() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let suites = load_suites(&dir).unwrap();
        let tables: Vec<&str> = suites.iter().map(|s| s.table.as_str()).collect();
        assert_eq!(tables, vec!["accounts", "customers", "transactions"]);
        assert!(suites.iter().all(|s| s.check_count() > 0));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_suites(dir.path()).unwrap().is_empty());
    }
}
