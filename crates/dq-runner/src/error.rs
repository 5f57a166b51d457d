//! Error types for the data quality runner.

use thiserror::Error;

/// Runner-level errors.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Database error (connection, query, decoding)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The configured connection URL could not be understood by the driver
    #[error("Invalid database URL '{url}': {message}")]
    InvalidDatabaseUrl { url: String, message: String },

    /// Suite parsing or check evaluation error
    #[error("Check error: {0}")]
    Check(#[from] dq_checks::CheckError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),
}

/// Result type alias using RunnerError.
pub type RunnerResult<T> = Result<T, RunnerError>;

impl From<envy::Error> for RunnerError {
    fn from(err: envy::Error) -> Self {
        RunnerError::Config(err.to_string())
    }
}

impl From<minijinja::Error> for RunnerError {
    fn from(err: minijinja::Error) -> Self {
        RunnerError::Template(err.to_string())
    }
}
