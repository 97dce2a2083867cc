//! Availability and booking operations using the plan-execute pattern.
//!
//! Every mutating operation is split into two phases:
//! 1. **Planning**: validates the request against the current database
//!    contents and builds an [`OperationPlan`]. Planning never writes.
//! 2. **Execution**: a [`PlanExecutor`] applies the plan inside one
//!    immediate transaction, repeating every check under the write lock.
//!
//! Read-only queries live in [`queries`].
//!
//! # Examples
//!
//! ```no_run
//! use lodge::config::ConfigBuilder;
//! use lodge::operations::{PlanExecutor, ReserveOptions, ReservePlan};
//! use lodge::{Actor, Database, DatabaseConfig, DateRange, PropertyId, Role, UserId};
//! use chrono::NaiveDate;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/lodge.db")).unwrap();
//! let config = ConfigBuilder::new().build().unwrap();
//!
//! let guest = Actor::new(UserId::new("gina").unwrap(), Role::User);
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
//! )
//! .unwrap();
//!
//! let options = ReserveOptions::new(guest, PropertyId::new("villa").unwrap(), range);
//! let plan = ReservePlan::new(options, &config).build_plan(db.connection()).unwrap();
//!
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! println!("booked: {:?}", result.booking);
//! ```

pub mod executor;
pub mod init;
pub mod lifecycle;
pub mod plan;
pub mod publish;
pub mod queries;
pub mod reserve;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use lifecycle::{DeleteOptions, DeletePlan, SetStatusOptions, SetStatusPlan};
pub use plan::{OperationPlan, PlanAction};
pub use publish::{PublishDayOptions, PublishDayPlan, PublishRangeOptions, PublishRangePlan};
pub use reserve::{ReserveOptions, ReservePlan};
