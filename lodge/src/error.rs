//! Error types for the lodge library.
//!
//! This module provides the error hierarchy for all availability and booking
//! operations, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::booking::BookingStatus;

/// Result type alias for operations that may fail with a lodge error.
///
/// # Examples
///
/// ```
/// use lodge::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the lodge library.
///
/// The first six variants form the engine's error taxonomy and are the ones
/// a transport layer translates into client responses. The remaining variants
/// cover storage, configuration and I/O failures.
#[derive(Debug, Error)]
pub enum Error {
    /// A date range was inverted or exceeded the configured length limit.
    #[error("invalid date range {start}..{end}: {reason}")]
    InvalidRange {
        /// The first day of the requested range.
        start: NaiveDate,
        /// The last day of the requested range.
        end: NaiveDate,
        /// The reason the range is invalid.
        reason: String,
    },

    /// The requested property, booking or availability row was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A write lost a race or collided with an existing row.
    #[error("conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// The requested range is not fully open for booking.
    #[error("property {property_id} is not available from {start} to {end}: {open_days} of {requested_days} day(s) open")]
    Unavailable {
        /// The property that was requested.
        property_id: String,
        /// The first requested day.
        start: NaiveDate,
        /// The last requested day.
        end: NaiveDate,
        /// Number of days in the range that were open.
        open_days: usize,
        /// Number of days in the range.
        requested_days: usize,
    },

    /// The actor is not allowed to act on this resource.
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Why the actor was refused.
        reason: String,
    },

    /// The status change is not permitted for this actor or current state.
    #[error("invalid transition from {from} to {to}: {reason}")]
    InvalidTransition {
        /// The booking's current status.
        from: BookingStatus,
        /// The requested status.
        to: BookingStatus,
        /// Why the transition was refused.
        reason: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Coarse classification of an [`Error`] for transport-level mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inverted or over-long date range.
    InvalidRange,
    /// Missing property, booking or availability row.
    NotFound,
    /// Duplicate row or lost reservation race.
    Conflict,
    /// Requested range not fully open.
    Unavailable,
    /// Role or ownership check failed.
    Unauthorized,
    /// Status change not permitted.
    InvalidTransition,
    /// Malformed input or configuration.
    Validation,
    /// Storage busy; the request can be re-submitted unchanged.
    Busy,
    /// Storage, I/O or other internal failure.
    Internal,
}

impl Error {
    /// Classifies this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::{Error, ErrorKind};
    ///
    /// let err = Error::Unauthorized { reason: "not the guest".into() };
    /// assert_eq!(err.kind(), ErrorKind::Unauthorized);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Validation { .. } | Self::Configuration(_) => ErrorKind::Validation,
            Self::LockTimeout { .. } => ErrorKind::Busy,
            Self::Database(_)
            | Self::Io(_)
            | Self::DataDirectoryNotFound { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Internal,
        }
    }

    /// Returns true if the caller caused this error and should not resend
    /// the same request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Busy | ErrorKind::Internal)
    }

    /// Returns true if the requested days are taken and the caller may try
    /// again with different dates.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::Error;
    ///
    /// let err = Error::Conflict { details: "lost race".into() };
    /// assert!(err.should_retry_with_other_dates());
    /// ```
    #[must_use]
    pub const fn should_retry_with_other_dates(&self) -> bool {
        matches!(self.kind(), ErrorKind::Unavailable | ErrorKind::Conflict)
    }

    /// Shorthand for a [`Error::NotFound`] with a formatted resource name.
    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for an [`Error::Unauthorized`].
    pub(crate) fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }
}

impl From<crate::calendar::InvalidDateRangeError> for Error {
    fn from(err: crate::calendar::InvalidDateRangeError) -> Self {
        Self::InvalidRange {
            start: err.start,
            end: err.end,
            reason: err.reason,
        }
    }
}

impl From<crate::model::ValidationError> for Error {
    fn from(err: crate::model::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
