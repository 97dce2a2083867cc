//! Environment variable handling for configuration overrides.
//!
//! `LODGE_*` variables override values from configuration files.

use std::env;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::logging::{LogLevel, LOG_MODE_ENV};

/// Overrides `maximum_lock_wait_seconds`.
pub const LOCK_WAIT_ENV: &str = "LODGE_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `max_range_days`.
pub const MAX_RANGE_DAYS_ENV: &str = "LODGE_MAX_RANGE_DAYS";
/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "LODGE_DISABLE_AUTOINIT";
/// Overrides `output_format`.
pub const OUTPUT_FORMAT_ENV: &str = "LODGE_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use lodge::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies every set `LODGE_*` variable to `config`.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the variable if its value cannot
    /// be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds = Some(Self::parse_number(LOCK_WAIT_ENV, &seconds)?);
        }

        if let Ok(days) = env::var(MAX_RANGE_DAYS_ENV) {
            config.max_range_days = Some(Self::parse_number(MAX_RANGE_DAYS_ENV, &days)?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(format.parse::<OutputFormat>().map_err(|message| {
                Error::Validation {
                    field: OUTPUT_FORMAT_ENV.into(),
                    message,
                }
            })?);
        }

        if let Ok(mode) = env::var(LOG_MODE_ENV) {
            config.log_mode = Some(LogLevel::parse(&mode).map_err(|message| Error::Validation {
                field: LOG_MODE_ENV.into(),
                message,
            })?);
        }

        Ok(())
    }

    fn parse_number<T: std::str::FromStr>(var_name: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| Error::Validation {
            field: var_name.into(),
            message: format!("must be a non-negative integer, got '{value}'"),
        })
    }

    /// Parses a boolean value from an environment variable.
    ///
    /// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for any other value.
    pub fn parse_bool(var_name: &str, value: &str) -> Result<bool> {
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: var_name.into(),
                message: format!("invalid boolean value: {value}"),
            }),
        }
    }
}
