//! Data directory initialization.
//!
//! Creates the data directory and an empty database, optionally with a
//! commented configuration file to start from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::loader::CONFIG_FILE_NAME;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE_NAME};
use crate::error::{Error, Result};

/// Options for database initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database, discarding its contents.
    pub overwrite: bool,
    /// Write a starter configuration file if none exists.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates initialization options for `data_dir`.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether to overwrite an existing database.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether to write a starter configuration file.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// Result of an initialization.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database was created or recreated.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

const DEFAULT_CONFIG_TEMPLATE: &str = r"# lodge configuration

# Seconds a writer waits for the database lock (default: 5)
# maximum_lock_wait_seconds: 5

# Longest range accepted when publishing or reserving (default: 366)
# max_range_days: 366

# Refuse to create a missing data directory implicitly
# disable_autoinit: false

# Listing format: table, json, csv or tsv (default: table)
# output_format: table

# Log verbosity: quiet, normal or verbose (default: normal)
# log_mode: normal
";

fn remove_database_files(db_path: &Path) -> Result<()> {
    fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = db_path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = PathBuf::from(sidecar);
        if sidecar.exists() {
            fs::remove_file(sidecar)?;
        }
    }
    Ok(())
}

/// Initializes the data directory and database.
///
/// # Errors
///
/// Returns a `Validation` error if the database exists and `overwrite` is
/// not set, or an I/O or database error if creation fails.
///
/// # Examples
///
/// ```no_run
/// use lodge::operations::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/lodge-data")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// println!("Database created: {}", result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }
        log::warn!("replacing existing database at {}", db_path.display());
        remove_database_files(&db_path)?;
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    result.database_created = true;

    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    log::info!("initialized {}", options.data_dir.display());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::database::test_util::register_test_property;
    use tempfile::TempDir;

    #[test]
    fn test_init_fresh_directory() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("lodge");

        let result = init_database(&InitOptions::new(data_dir.clone())).unwrap();

        assert!(result.data_dir_created);
        assert!(result.database_created);
        assert!(!result.config_created);
        assert!(data_dir.join(DATABASE_FILE_NAME).exists());
    }

    #[test]
    fn test_init_with_config_writes_loadable_template() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("lodge");

        let result =
            init_database(&InitOptions::new(data_dir.clone()).with_create_config(true)).unwrap();
        assert!(result.config_created);

        // Every line is commented out, so the template parses to defaults.
        let config = ConfigLoader::load_file(&data_dir.join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.max_range_days(), 366);
    }

    #[test]
    fn test_init_fails_without_overwrite() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().to_path_buf();
        init_database(&InitOptions::new(data_dir.clone())).unwrap();

        match init_database(&InitOptions::new(data_dir)) {
            Err(Error::Validation { field, message }) => {
                assert_eq!(field, "database");
                assert!(message.contains("--overwrite"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_overwrite_discards_contents() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().to_path_buf();
        init_database(&InitOptions::new(data_dir.clone())).unwrap();

        {
            let db = Database::open(DatabaseConfig::new(data_dir.join(DATABASE_FILE_NAME))).unwrap();
            register_test_property(&db, "villa", "hannah", 100);
        }

        init_database(&InitOptions::new(data_dir.clone()).with_overwrite(true)).unwrap();
        let db = Database::open(DatabaseConfig::new(data_dir.join(DATABASE_FILE_NAME))).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM properties", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_existing_config_kept() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "max_range_days: 7\n").unwrap();

        let result =
            init_database(&InitOptions::new(temp.path().to_path_buf()).with_create_config(true))
                .unwrap();

        assert!(!result.config_created);
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "max_range_days: 7\n");
    }
}
