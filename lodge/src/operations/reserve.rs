//! Reservation planning.
//!
//! The planner checks the range and pre-checks availability without taking
//! a lock, so most doomed requests fail early with a descriptive error. The
//! executor repeats the check under the write lock and is authoritative.

use rusqlite::Connection;

use crate::calendar::DateRange;
use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::model::{Actor, PropertyId};
use crate::property::require_property;

use super::plan::{OperationPlan, PlanAction};
use super::publish::check_range_limit;

/// Options for a reserve operation.
#[derive(Debug, Clone)]
pub struct ReserveOptions {
    /// The guest making the reservation.
    pub actor: Actor,
    /// The property to book.
    pub property_id: PropertyId,
    /// The nights to book, inclusive.
    pub range: DateRange,
}

impl ReserveOptions {
    /// Creates reserve options.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::operations::ReserveOptions;
    /// use lodge::{Actor, DateRange, PropertyId, Role, UserId};
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    /// let options = ReserveOptions::new(
    ///     Actor::new(UserId::new("gina").unwrap(), Role::User),
    ///     PropertyId::new("villa").unwrap(),
    ///     DateRange::single(day),
    /// );
    /// assert_eq!(options.range.len(), 1);
    /// ```
    #[must_use]
    pub const fn new(actor: Actor, property_id: PropertyId, range: DateRange) -> Self {
        Self {
            actor,
            property_id,
            range,
        }
    }
}

/// Plans a reservation.
pub struct ReservePlan<'a> {
    options: ReserveOptions,
    config: &'a Config,
}

impl<'a> ReservePlan<'a> {
    /// Creates a planner for `options`.
    #[must_use]
    pub const fn new(options: ReserveOptions, config: &'a Config) -> Self {
        Self { options, config }
    }

    /// Validates the request and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if the range exceeds the configured limit,
    /// `NotFound` for an unknown property, and `Unavailable` if any day in
    /// the range is missing or not open.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let opts = &self.options;
        check_range_limit(opts.range, self.config)?;

        let property = require_property(conn, &opts.property_id)?;

        let open_days = Database::count_open_days(conn, &opts.property_id, opts.range)?;
        if open_days != opts.range.len() {
            return Err(Error::Unavailable {
                property_id: opts.property_id.to_string(),
                start: opts.range.start(),
                end: opts.range.end(),
                open_days,
                requested_days: opts.range.len(),
            });
        }

        let mut plan = OperationPlan::new(format!(
            "Reserve {} at {} for {}",
            opts.range, opts.property_id, opts.actor.id
        ))
        .add_action(PlanAction::Reserve {
            property_id: opts.property_id.clone(),
            guest_id: opts.actor.id.clone(),
            range: opts.range,
        });

        if property.owner_id == opts.actor.id {
            plan = plan.add_warning(format!(
                "{} is reserving their own property {}",
                opts.actor.id, opts.property_id
            ));
        }

        log::debug!("planned reservation: {}", plan.description);
        Ok(plan)
    }
}
