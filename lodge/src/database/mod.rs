//! Database layer for persistent storage of availability and bookings.
//!
//! This module provides a SQLite-based storage layer: connection management,
//! schema versioning, row-level operations and the immediate-transaction
//! helper every atomic write goes through.
//!
//! # Examples
//!
//! ```no_run
//! use lodge::database::{Database, DatabaseConfig};
//! use lodge::{Money, Property, PropertyId, UserId};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/lodge.db")).unwrap();
//!
//! let property = Property::new(
//!     PropertyId::new("villa").unwrap(),
//!     UserId::new("hannah").unwrap(),
//!     Money::from_units(100).unwrap(),
//! );
//! Database::register_property(db.connection(), &property).unwrap();
//!
//! for booking in Database::list_all_bookings(db.connection()).unwrap() {
//!     println!("{booking:?}");
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
