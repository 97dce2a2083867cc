//! Common test utilities for integration tests.
//!
//! [`TestEnv`] owns a temporary data directory. Every call to
//! [`TestEnv::open`] returns a fresh connection to the same database file,
//! so tests can model independent units of work the way callers do.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use tempfile::TempDir;

use lodge::config::Config;
use lodge::operations::{
    DeleteOptions, DeletePlan, ExecutionResult, PlanExecutor, PublishRangeOptions,
    PublishRangePlan, ReserveOptions, ReservePlan, SetStatusOptions, SetStatusPlan,
};
use lodge::{
    Actor, Booking, BookingId, BookingStatus, Database, DatabaseConfig, DateRange, Money,
    Property, PropertyId, Result, Role, UserId,
};

/// A throwaway data directory with one database file.
pub struct TestEnv {
    dir: TempDir,
    pub config: Config,
}

impl TestEnv {
    /// Creates an empty environment with default configuration.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            config: Config::default(),
        }
    }

    /// Path of the database file.
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("lodge.db")
    }

    /// The data directory.
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Opens a new connection with a generous busy timeout.
    pub fn open(&self) -> Database {
        Database::open(
            DatabaseConfig::new(self.db_path()).with_busy_timeout(Duration::from_secs(30)),
        )
        .unwrap()
    }

    /// Registers a property with a whole-unit base price.
    pub fn property(&self, id: &str, owner: &str, price: i64) -> Property {
        let property = Property::new(
            PropertyId::new(id).unwrap(),
            UserId::new(owner).unwrap(),
            Money::from_units(price).unwrap(),
        );
        Database::register_property(self.open().connection(), &property).unwrap();
        property
    }

    /// Publishes an open range at the property's base price as its host.
    pub fn open_range(&self, property: &Property, start: &str, end: &str) {
        let host = Actor::new(property.owner_id.clone(), Role::Host);
        let options = PublishRangeOptions::new(host, property.id.clone(), range(start, end));
        let mut db = self.open();
        let plan = PublishRangePlan::new(options, &self.config)
            .build_plan(db.connection())
            .unwrap();
        PlanExecutor::new(&mut db).execute(&plan).unwrap();
    }

    /// Plans and executes a reservation on a fresh connection.
    pub fn reserve(&self, guest: &Actor, property: &str, start: &str, end: &str) -> Result<Booking> {
        let mut db = self.open();
        let options = ReserveOptions::new(
            guest.clone(),
            PropertyId::new(property).unwrap(),
            range(start, end),
        );
        let plan = ReservePlan::new(options, &self.config).build_plan(db.connection())?;
        let result = PlanExecutor::new(&mut db).execute(&plan)?;
        Ok(result.booking.expect("reservation returns its booking"))
    }

    /// Executes a reservation without the planner's pre-check.
    pub fn reserve_unplanned(
        &self,
        guest: &Actor,
        property: &str,
        start: &str,
        end: &str,
    ) -> Result<ExecutionResult> {
        let mut db = self.open();
        let plan = lodge::OperationPlan::new("reserve").add_action(lodge::PlanAction::Reserve {
            property_id: PropertyId::new(property).unwrap(),
            guest_id: guest.id.clone(),
            range: range(start, end),
        });
        PlanExecutor::new(&mut db).execute(&plan)
    }

    /// Plans and executes a status change.
    pub fn set_status(&self, actor: &Actor, id: BookingId, status: BookingStatus) -> Result<Booking> {
        let mut db = self.open();
        let plan = SetStatusPlan::new(SetStatusOptions::new(actor.clone(), id, status))
            .build_plan(db.connection())?;
        let result = PlanExecutor::new(&mut db).execute(&plan)?;
        Ok(result.booking.expect("status change returns the booking"))
    }

    /// Plans and executes a deletion.
    pub fn delete(&self, actor: &Actor, id: BookingId) -> Result<()> {
        let mut db = self.open();
        let plan = DeletePlan::new(DeleteOptions::new(actor.clone(), id)).build_plan(db.connection())?;
        PlanExecutor::new(&mut db).execute(&plan)?;
        Ok(())
    }

    /// Existing availability rows for a property in `start..=end`.
    pub fn days(&self, property: &str, start: &str, end: &str) -> Vec<lodge::Availability> {
        Database::query_availability(
            self.open().connection(),
            &PropertyId::new(property).unwrap(),
            range(start, end),
        )
        .unwrap()
    }
}

/// Parses a `YYYY-MM-DD` day.
pub fn day(text: &str) -> NaiveDate {
    lodge::calendar::parse_day(text).unwrap()
}

/// Builds an inclusive range from two `YYYY-MM-DD` days.
pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(day(start), day(end)).unwrap()
}

/// A plain guest.
pub fn guest(id: &str) -> Actor {
    Actor::new(UserId::new(id).unwrap(), Role::User)
}

/// A host.
pub fn host(id: &str) -> Actor {
    Actor::new(UserId::new(id).unwrap(), Role::Host)
}

/// An administrator.
pub fn admin(id: &str) -> Actor {
    Actor::new(UserId::new(id).unwrap(), Role::Admin)
}
