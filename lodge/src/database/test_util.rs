//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::availability::Availability;
use crate::calendar::{parse_day, DateRange};
use crate::database::{Database, DatabaseConfig};
use crate::model::{Money, PropertyId, UserId};
use crate::property::Property;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the test process.
    std::mem::forget(dir);

    db
}

/// Registers a property with a whole-unit base price.
///
/// # Panics
///
/// Panics if the identifiers are invalid or the write fails.
pub fn register_test_property(db: &Database, id: &str, owner: &str, price: i64) -> Property {
    let property = Property::new(
        PropertyId::new(id).unwrap(),
        UserId::new(owner).unwrap(),
        Money::from_units(price).unwrap(),
    );
    Database::register_property(db.connection(), &property).unwrap();
    property
}

/// Creates open rows for every day in `start..=end`, with an optional
/// whole-unit price.
///
/// # Panics
///
/// Panics if the dates are invalid or a row already exists.
pub fn open_test_days(
    db: &Database,
    property: &Property,
    start: &str,
    end: &str,
    price: Option<i64>,
) {
    let range = DateRange::new(parse_day(start).unwrap(), parse_day(end).unwrap()).unwrap();
    let price = price.map(|p| Money::from_units(p).unwrap());
    for date in range {
        let day = Availability::builder(property.id.clone(), date)
            .price(price)
            .build()
            .unwrap();
        Database::insert_availability(db.connection(), &day).unwrap();
    }
}
