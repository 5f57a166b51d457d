//! Data Quality Runner
//!
//! Loads per-table suites, checks the tables in PostgreSQL and writes an
//! HTML report plus a JSON details file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dq_checks::RunSummary;
use dq_runner::{
    config::{DatabaseConfig, RunnerConfig},
    report::{write_reports, ReportRenderer},
    runner::run_all,
    suite_loader::load_suites,
};

#[derive(Parser)]
#[command(name = "dq-runner")]
#[command(version, about = "Data quality checks for PostgreSQL tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "DQ_LOG_JSON")]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every suite and write the reports
    /// Examples:
    ///     dq-runner run
    ///     dq-runner run --config-dir ./config --output-dir ./output
    ///     DQ_DB_URL=postgresql://dq:pw@db:5432/bank dq-runner run --fail-on-error
    #[command(verbatim_doc_comment)]
    Run {
        /// Directory with suite files (overrides DQ_CONFIG_DIR)
        #[arg(short, long)]
        config_dir: Option<PathBuf>,

        /// Directory for reports (overrides DQ_OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Custom HTML template (overrides DQ_TEMPLATE_FILE)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Exit with a non-zero status when any check fails
        #[arg(long)]
        fail_on_error: bool,
    },
    /// Parse all suites without touching the database
    Validate {
        /// Directory with suite files (overrides DQ_CONFIG_DIR)
        #[arg(short, long)]
        config_dir: Option<PathBuf>,
    },
    /// Check that the database answers `SELECT 1`
    Ping,
    /// Show the effective configuration (password redacted)
    Config,
}

/// Initialize tracing/logging. Logs go to stderr so stdout stays clean.
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,dq_runner=debug,dq_checks=info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let db_config = DatabaseConfig::from_env().context("Failed to load database config")?;
    let mut runner_config = RunnerConfig::from_env().context("Failed to load runner config")?;

    match cli.command {
        Commands::Run {
            config_dir,
            output_dir,
            template,
            fail_on_error,
        } => {
            if let Some(dir) = config_dir {
                runner_config.config_dir = dir;
            }
            if let Some(dir) = output_dir {
                runner_config.output_dir = dir;
            }
            if template.is_some() {
                runner_config.template_file = template;
            }
            run(&db_config, &runner_config, fail_on_error).await
        }
        Commands::Validate { config_dir } => {
            if let Some(dir) = config_dir {
                runner_config.config_dir = dir;
            }
            validate(&runner_config)
        }
        Commands::Ping => ping(&db_config, &runner_config).await,
        Commands::Config => {
            show_config(&db_config, &runner_config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run(
    db_config: &DatabaseConfig,
    runner_config: &RunnerConfig,
    fail_on_error: bool,
) -> Result<ExitCode> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env = %runner_config.env,
        config_dir = %runner_config.config_dir.display(),
        "Starting data quality run"
    );

    runner_config.validate_database(db_config)?;
    let renderer = ReportRenderer::with_template(runner_config.template_file.as_deref())
        .context("Failed to load report template")?;

    let suites = load_suites(&runner_config.config_dir)?;
    let engine = db_config.engine();
    let results = run_all(&engine, &suites)
        .await
        .context("Data quality run aborted")?;

    let summary = RunSummary::build(results);
    let report = write_reports(&summary, &runner_config.output_dir, &renderer)
        .context("Failed to write reports")?;

    tracing::info!(
        tables = summary.total_tables,
        checks = summary.total_checks,
        failed = summary.failed_checks,
        pass_rate = summary.pass_rate,
        "Data quality run complete"
    );
    println!("DQ report created: {}", report.display());

    if fail_on_error && summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn validate(runner_config: &RunnerConfig) -> Result<ExitCode> {
    let suites = load_suites(&runner_config.config_dir)?;
    let checks: usize = suites.iter().map(|s| s.check_count()).sum();
    for suite in &suites {
        println!("{}: {} checks", suite.table, suite.check_count());
    }
    println!("{} tables, {} checks", suites.len(), checks);
    Ok(ExitCode::SUCCESS)
}

async fn ping(db_config: &DatabaseConfig, runner_config: &RunnerConfig) -> Result<ExitCode> {
    runner_config.validate_database(db_config)?;
    let engine = db_config.engine();
    engine
        .ping()
        .await
        .with_context(|| format!("Database not reachable at {}", engine.redacted_url()))?;
    println!("Database reachable: {}", engine.redacted_url());
    Ok(ExitCode::SUCCESS)
}

fn show_config(db_config: &DatabaseConfig, runner_config: &RunnerConfig) {
    println!("database_url      = {}", db_config.redacted_url());
    println!("default_url       = {}", db_config.uses_default_url());
    println!("max_connections   = {}", db_config.db_max_connections);
    println!("acquire_timeout_s = {}", db_config.db_acquire_timeout);
    println!("config_dir        = {}", runner_config.config_dir.display());
    println!("output_dir        = {}", runner_config.output_dir.display());
    match &runner_config.template_file {
        Some(path) => println!("template_file     = {}", path.display()),
        None => println!("template_file     = <built-in>"),
    }
    println!("env               = {}", runner_config.env);
}
