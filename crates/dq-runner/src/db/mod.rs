//! Database module for the data quality runner.
//!
//! This module provides the engine provider (a lazily-connecting
//! PostgreSQL handle built from configuration) and the table loader.

pub mod engine;
pub mod loader;

pub use engine::{driver_url, get_engine, redact_url, DbPool, Engine, PoolSettings};
pub use loader::load_table;
