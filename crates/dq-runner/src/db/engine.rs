//! Engine provider: a configured, lazily-connecting PostgreSQL handle.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::borrow::Cow;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::{resolve_url, DB_URL_ENV};
use crate::error::{RunnerError, RunnerResult};

/// Type alias for the PostgreSQL connection pool.
pub type DbPool = PgPool;

/// Redaction placeholder for credentials in logged URLs.
const REDACTED: &str = "[REDACTED]";

/// Pool knobs handed to the client library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum connections in the pool
    pub max_connections: u32,

    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Database engine bound to one connection URL.
///
/// Creating an engine neither parses the URL nor touches the network. The
/// pool is built on first use and connections are opened as queries need
/// them, so a malformed URL or an unreachable host is reported by the first
/// operation that needs the database.
#[derive(Debug)]
pub struct Engine {
    url: String,
    settings: PoolSettings,
    pool: OnceCell<DbPool>,
}

/// Build an engine from `DQ_DB_URL`, or the default URL when it is unset
/// or empty.
///
/// Never fails; each call returns a new, independent engine.
pub fn get_engine() -> Engine {
    let configured = std::env::var(DB_URL_ENV).ok();
    Engine::new(resolve_url(configured.as_deref()), PoolSettings::default())
}

impl Engine {
    /// Create an engine for `url`. The URL is kept exactly as given.
    pub fn new(url: impl Into<String>, settings: PoolSettings) -> Self {
        Self {
            url: url.into(),
            settings,
            pool: OnceCell::new(),
        }
    }

    /// The configured connection URL, unmodified.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The configured URL with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// Returns true once the pool has been built.
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Parse the configured URL into driver connection options.
    pub fn connect_options(&self) -> RunnerResult<PgConnectOptions> {
        PgConnectOptions::from_str(&driver_url(&self.url)).map_err(|e| {
            RunnerError::InvalidDatabaseUrl {
                url: self.redacted_url(),
                message: e.to_string(),
            }
        })
    }

    /// The connection pool, built on first call.
    pub async fn pool(&self) -> RunnerResult<&DbPool> {
        self.pool
            .get_or_try_init(|| async {
                let options = self.connect_options()?;
                let pool = PgPoolOptions::new()
                    .max_connections(self.settings.max_connections)
                    .acquire_timeout(self.settings.acquire_timeout)
                    .connect_lazy_with(options);

                tracing::info!(
                    url = %self.redacted_url(),
                    max_connections = self.settings.max_connections,
                    "Database connection pool created"
                );

                Ok::<_, RunnerError>(pool)
            })
            .await
    }

    /// Run `SELECT 1` against the database.
    pub async fn ping(&self) -> RunnerResult<()> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

/// URL handed to the driver.
///
/// SQLAlchemy-style `dialect+driver` schemes such as `postgresql+psycopg2`
/// are reduced to the dialect; anything else is returned unchanged.
pub fn driver_url(url: &str) -> Cow<'_, str> {
    if let Some((scheme, rest)) = url.split_once("://") {
        if let Some((dialect, _driver)) = scheme.split_once('+') {
            return Cow::Owned(format!("{}://{}", dialect, rest));
        }
    }
    Cow::Borrowed(url)
}

/// Mask the password of a connection URL.
///
/// Unparseable URLs that may carry credentials are replaced entirely.
pub fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(parsed) => match parsed.password() {
            Some(password) => {
                let user = parsed.username();
                let needle = format!("{}:{}@", user, password);
                if raw.contains(&needle) {
                    raw.replacen(&needle, &format!("{}:{}@", user, REDACTED), 1)
                } else {
                    REDACTED.to_string()
                }
            }
            None => raw.to_string(),
        },
        Err(_) if raw.contains('@') => REDACTED.to_string(),
        Err(_) => raw.to_string(),
    }
}
