//! Configuration schema definitions.
//!
//! Every field is optional so that partial configurations from different
//! sources can be layered; accessors on [`Config`] apply the built-in
//! defaults.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Default busy timeout for acquiring the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Default upper bound on the number of days in a published or reserved range.
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 366;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use lodge::config::Config;
///
/// let config = Config {
///     max_range_days: Some(30),
///     ..Default::default()
/// };
/// assert_eq!(config.max_range_days(), 30);
/// assert_eq!(Config::default().max_range_days(), 366);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Longest range, in days, accepted by bulk publishing and reservation.
    pub max_range_days: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for listing commands.
    pub output_format: Option<OutputFormat>,

    /// Default log verbosity.
    pub log_mode: Option<LogLevel>,
}

impl Config {
    /// Busy timeout for the database write lock.
    #[must_use]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Longest accepted range in days.
    #[must_use]
    pub fn max_range_days(&self) -> u32 {
        self.max_range_days.unwrap_or(DEFAULT_MAX_RANGE_DAYS)
    }

    /// Whether a missing data directory may be created on demand.
    #[must_use]
    pub fn autoinit_enabled(&self) -> bool {
        !self.disable_autoinit.unwrap_or(false)
    }

    /// Output format for listings, defaulting to a table.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or(OutputFormat::Table)
    }
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use lodge::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
