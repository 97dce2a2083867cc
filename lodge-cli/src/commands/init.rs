//! Init command implementation.
//!
//! Creates the data directory and an empty booking database. Running it is
//! optional unless `--disable-autoinit` is in effect.

use std::path::{Path, PathBuf};

use clap::Parser;
use lodge::config::loader::CONFIG_FILE_NAME;
use lodge::database::{resolve_data_dir, DATABASE_FILE_NAME};
use lodge::operations::{init_database, InitOptions};

use crate::error::CliError;
use crate::utils::GlobalOptions;

/// Initialize lodge data directory and database.
#[derive(Parser)]
#[command(about = "Initialize lodge data directory and database")]
pub struct InitCommand {
    /// Replace an existing database, discarding its bookings
    #[arg(long)]
    overwrite: bool,

    /// Write a commented configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--data-dir` names where to create the directory rather than where to
    /// find an existing one.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match global.data_dir.clone() {
            Some(dir) => dir,
            None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string()))?,
        };

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize lodge in: {}", data_dir.display());
            for step in self.planned_steps(&data_dir) {
                println!("  - {step}");
            }
            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        let mut done = Vec::new();
        if result.data_dir_created {
            done.push("Created data directory");
        }
        if result.database_created {
            done.push(if self.overwrite {
                "Recreated database"
            } else {
                "Created database"
            });
        }
        if result.config_created {
            done.push("Created default configuration file");
        } else if self.with_config {
            done.push("Kept existing configuration file");
        }

        println!("Initialized lodge in: {}", result.data_dir.display());
        for step in done {
            println!("  - {step}");
        }
        Ok(())
    }

    fn planned_steps(&self, data_dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        if !data_dir.exists() {
            steps.push(format!("Create data directory: {}", data_dir.display()));
        }

        let db_path: PathBuf = data_dir.join(DATABASE_FILE_NAME);
        if !db_path.exists() {
            steps.push(format!("Create database: {}", db_path.display()));
        } else if self.overwrite {
            steps.push(format!("Replace database: {}", db_path.display()));
        } else {
            steps.push(format!(
                "Stop: database exists at {} (use --overwrite to replace it)",
                db_path.display()
            ));
        }

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        if self.with_config && !config_path.exists() {
            steps.push(format!("Create configuration file: {}", config_path.display()));
        }
        steps
    }
}
