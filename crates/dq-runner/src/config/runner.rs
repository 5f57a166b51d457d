//! Runner configuration: where suites live, where reports go.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{DatabaseConfig, ENV_PREFIX};
use crate::error::{RunnerError, RunnerResult};

/// Deployment mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunEnvironment {
    /// Local development; the built-in default connection URL is accepted.
    #[default]
    Development,
    /// Production; a connection URL must be configured explicitly.
    Production,
}

impl std::fmt::Display for RunEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunEnvironment::Development => write!(f, "development"),
            RunEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Runner configuration loaded from environment variables.
///
/// Environment variables are prefixed with `DQ_`:
/// - `DQ_CONFIG_DIR`: Directory with suite files (default: "config")
/// - `DQ_OUTPUT_DIR`: Directory for reports (default: "output")
/// - `DQ_TEMPLATE_FILE`: Custom HTML report template (optional)
/// - `DQ_ENV`: "development" (default) or "production"
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Directory with `*.json` suite files
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Directory the reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Custom report template; the built-in one is used when unset
    #[serde(default)]
    pub template_file: Option<PathBuf>,

    /// Deployment mode
    #[serde(default)]
    pub env: RunEnvironment,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("config")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env::<RunnerConfig>()
    }

    /// Load configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter::<_, RunnerConfig>(vars)
    }

    /// Reject database settings that are unsafe for the current mode.
    ///
    /// Production runs must not fall back to the built-in credentials.
    pub fn validate_database(&self, db: &DatabaseConfig) -> RunnerResult<()> {
        if db.uses_default_url() {
            if self.env == RunEnvironment::Production {
                return Err(RunnerError::Config(format!(
                    "{} must be set in production mode",
                    super::DB_URL_ENV
                )));
            }
            tracing::warn!(
                url = %db.redacted_url(),
                "DQ_DB_URL not set, using default development database (not for production)"
            );
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            output_dir: default_output_dir(),
            template_file: None,
            env: RunEnvironment::default(),
        }
    }
}
