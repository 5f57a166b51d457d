//! Data Quality Check Library
//!
//! Declarative data quality checks evaluated over rows loaded from a table.
//!
//! This crate provides:
//! - Typed suite model (one suite per table) parsed from JSON
//! - Table-level checks: row counts, primary key completeness and uniqueness
//! - Column-level checks: nulls, allowed sets, patterns, lengths, numeric
//!   bounds, timestamps, booleans and conditional requirements
//! - Run summary aggregation
//!
//! The crate has no database dependency; rows are handed in as a [`Frame`].

pub mod checks;
pub mod error;
pub mod frame;
pub mod result;
pub mod suite;
pub mod summary;
pub mod value;

pub use checks::evaluate_suite;
pub use error::CheckError;
pub use frame::{Frame, Row};
pub use result::{CheckLevel, CheckResult, FAILED_SAMPLE_LIMIT};
pub use suite::{CheckSpec, ColumnConfig, LoadConfig, Suite};
pub use summary::{RunSummary, TableSummary};
