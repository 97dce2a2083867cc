//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use lodge::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { max_range_days: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates every set field.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for a zero lock timeout or a zero range
    /// limit.
    pub fn validate(config: &Config) -> Result<()> {
        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "timeout must be greater than 0".into(),
            });
        }

        if config.max_range_days == Some(0) {
            return Err(Error::Validation {
                field: "max_range_days".into(),
                message: "must allow at least one day".into(),
            });
        }

        Ok(())
    }
}
