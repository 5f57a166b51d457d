//! Data Quality Runner Library
//!
//! This crate runs declarative data quality suites against PostgreSQL:
//!
//! - **Engine Provider**: a lazily-connecting database handle configured from
//!   `DQ_DB_URL` (see [`db::get_engine`])
//! - **Suite Loading**: per-table JSON suites discovered in a directory
//! - **Execution**: load each table and evaluate its checks
//! - **Reporting**: HTML report and JSON run details
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from environment variables
//! - [`db`]: Engine provider and table loading
//! - [`error`]: Runner error types
//! - [`report`]: HTML/JSON report output
//! - [`runner`]: Suite execution
//! - [`suite_loader`]: Suite file discovery
//!
//! ## Example
//!
//! ```ignore
//! use dq_runner::{config::RunnerConfig, db::get_engine, report, runner, suite_loader};
//! use dq_checks::RunSummary;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RunnerConfig::from_env()?;
//!     let engine = get_engine();
//!     let suites = suite_loader::load_suites(&config.config_dir)?;
//!     let summary = RunSummary::build(runner::run_all(&engine, &suites).await?);
//!     let renderer = report::ReportRenderer::new()?;
//!     report::write_reports(&summary, &config.output_dir, &renderer)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod report;
pub mod result_ext;
pub mod runner;
pub mod suite_loader;

pub use db::{get_engine, Engine};
pub use error::{RunnerError, RunnerResult};
pub use result_ext::ResultExt;
