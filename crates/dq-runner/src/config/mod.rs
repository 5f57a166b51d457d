//! Configuration module for the data quality runner.
//!
//! Configuration is loaded once at startup from `DQ_`-prefixed environment
//! variables using the `envy` crate, then handed explicitly to the
//! components that need it. CLI flags override individual values.

mod database;
mod runner;

pub use database::{resolve_url, DatabaseConfig, DB_URL_ENV, DEFAULT_DB_URL};
pub use runner::{RunEnvironment, RunnerConfig};

/// Prefix shared by every runner environment variable.
pub const ENV_PREFIX: &str = "DQ_";
