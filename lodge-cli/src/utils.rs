//! Utility functions for CLI operations.
//!
//! This module provides helpers shared across commands: resolving the data
//! directory, loading configuration, opening the database, identifying the
//! acting user, and printing plans and timestamps.

use std::path::PathBuf;
use std::time::SystemTime;

use lodge::database::{resolve_data_dir, DATABASE_FILE_NAME};
use lodge::{Actor, Config, ConfigBuilder, Database, DatabaseConfig, OperationPlan, Role, UserId};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Id of the user performing the command.
    pub actor: Option<String>,

    /// Role of the user performing the command.
    pub role: Role,
}

/// Resolve the data directory: `--data-dir`, then `LODGE_DATA_DIR`, then `~/.lodge`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load layered configuration.
///
/// Sources are merged with precedence:
/// 1. Global options (highest priority)
/// 2. `LODGE_*` environment variables
/// 3. `<data dir>/config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let overrides = Config {
        maximum_lock_wait_seconds: global.busy_timeout,
        disable_autoinit: global.disable_autoinit.then_some(true),
        ..Config::default()
    };

    ConfigBuilder::new()
        .with_data_dir(data_dir(global)?)
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && !config.autoinit_enabled() {
        return Err(CliError::NoDataDirectory);
    }

    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(config.lock_timeout());
    Database::open(db_config).map_err(CliError::from)
}

/// The actor named by `--actor`/`LODGE_ACTOR` with its `--role`.
pub fn current_actor(global: &GlobalOptions) -> Result<Actor, CliError> {
    let id = global.actor.as_deref().ok_or_else(|| {
        CliError::InvalidArguments("no actor given (use --actor or LODGE_ACTOR)".to_string())
    })?;
    Ok(Actor::new(UserId::new(id)?, global.role))
}

/// Print the actions and warnings of a plan that will not be executed.
pub fn print_dry_run(plan: &OperationPlan, global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    if !plan.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &plan.warnings {
            eprintln!("  - {warning}");
        }
    }
}

/// Print execution warnings to stderr.
pub fn print_warnings(warnings: &[String], global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
