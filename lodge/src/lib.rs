#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # lodge
//!
//! A library for publishing day-level property availability and reserving
//! date ranges without double-booking.
//!
//! Hosts publish which days a property can be booked. Guests reserve an
//! inclusive range of days; a reservation succeeds only if every day in the
//! range is open, and it holds all of them in one atomic write. Bookings then
//! move through `PENDING`, `CONFIRMED` and `CANCELLED` under role rules, and
//! cancelling or deleting a booking releases its days.
//!
//! ## Core Types
//!
//! - [`DateRange`]: an inclusive, validated range of calendar days
//! - [`Availability`] and [`DayMark`]: per-day rows and the marks applied to them
//! - [`Booking`], [`BookingId`] and [`BookingStatus`]: reservations and their lifecycle
//! - [`Actor`] and [`Role`]: the trusted caller of an operation
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use lodge::{DateRange, Money};
//! use chrono::NaiveDate;
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(range.len(), 3);
//!
//! let nightly = Money::from_units(100).unwrap();
//! assert_eq!(nightly.checked_mul(3).unwrap().to_string(), "300");
//! ```

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;
pub mod operations;
pub mod property;

pub use availability::{Availability, DayMark};
pub use booking::{Booking, BookingId, BookingStatus};
pub use calendar::DateRange;
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use model::{Actor, Money, PropertyId, Role, UserId};
pub use operations::{ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use property::{Property, PropertyDirectory};
