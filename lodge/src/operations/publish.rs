//! Availability publishing plans.
//!
//! Hosts publish the days a property can be booked, either one day at a
//! time or as a range. Single days never overwrite an existing row; ranges
//! skip days that already have one.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::availability::Availability;
use crate::calendar::DateRange;
use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::model::{Actor, Money, PropertyId};
use crate::property::{authorize_management, require_property};

use super::plan::{OperationPlan, PlanAction};

/// Options for publishing a single day.
#[derive(Debug, Clone)]
pub struct PublishDayOptions {
    /// The actor publishing the day.
    pub actor: Actor,
    /// The property to publish for.
    pub property_id: PropertyId,
    /// The day to publish.
    pub date: NaiveDate,
    /// Whether the day is open for booking.
    pub is_available: bool,
    /// Nightly price for this day.
    pub price: Option<Money>,
}

impl PublishDayOptions {
    /// Creates options for an open day without its own price.
    #[must_use]
    pub const fn new(actor: Actor, property_id: PropertyId, date: NaiveDate) -> Self {
        Self {
            actor,
            property_id,
            date,
            is_available: true,
            price: None,
        }
    }

    /// Sets whether the day is open.
    #[must_use]
    pub const fn with_available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Sets the nightly price.
    #[must_use]
    pub const fn with_price(mut self, price: Option<Money>) -> Self {
        self.price = price;
        self
    }
}

/// Plans the creation of a single availability row.
pub struct PublishDayPlan {
    options: PublishDayOptions,
}

impl PublishDayPlan {
    /// Creates a planner for `options`.
    #[must_use]
    pub const fn new(options: PublishDayOptions) -> Self {
        Self { options }
    }

    /// Validates the request and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown property, `Unauthorized` if the
    /// actor may not manage it, and `Conflict` if the day already exists.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let opts = &self.options;
        let property = require_property(conn, &opts.property_id)?;
        authorize_management(&opts.actor, &property)?;

        let existing =
            Database::query_availability(conn, &opts.property_id, DateRange::single(opts.date))?;
        if !existing.is_empty() {
            return Err(Error::Conflict {
                details: format!(
                    "availability for {} on {} already exists",
                    opts.property_id, opts.date
                ),
            });
        }

        let day = Availability::builder(opts.property_id.clone(), opts.date)
            .available(opts.is_available)
            .price(opts.price)
            .build()?;

        Ok(OperationPlan::new(format!(
            "Publish {} for property {}",
            opts.date, opts.property_id
        ))
        .add_action(PlanAction::PublishDay {
            actor: opts.actor.clone(),
            day,
        }))
    }
}

/// Options for publishing a range of days.
#[derive(Debug, Clone)]
pub struct PublishRangeOptions {
    /// The actor publishing the range.
    pub actor: Actor,
    /// The property to publish for.
    pub property_id: PropertyId,
    /// The days to cover.
    pub range: DateRange,
    /// Whether the new rows are open.
    pub is_available: bool,
    /// Nightly price; defaults to the property's base price.
    pub price: Option<Money>,
}

impl PublishRangeOptions {
    /// Creates options for an open range at the property's base price.
    #[must_use]
    pub const fn new(actor: Actor, property_id: PropertyId, range: DateRange) -> Self {
        Self {
            actor,
            property_id,
            range,
            is_available: true,
            price: None,
        }
    }

    /// Sets whether the new rows are open.
    #[must_use]
    pub const fn with_available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Sets an explicit nightly price.
    #[must_use]
    pub const fn with_price(mut self, price: Option<Money>) -> Self {
        self.price = price;
        self
    }
}

/// Plans bulk creation of availability rows.
pub struct PublishRangePlan<'a> {
    options: PublishRangeOptions,
    config: &'a Config,
}

impl<'a> PublishRangePlan<'a> {
    /// Creates a planner for `options`.
    #[must_use]
    pub const fn new(options: PublishRangeOptions, config: &'a Config) -> Self {
        Self { options, config }
    }

    /// Validates the request and builds the plan.
    ///
    /// Days that already have a row are reported as a warning and will be
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if the range is longer than the configured
    /// limit, `NotFound` for an unknown property, and `Unauthorized` if the
    /// actor may not manage it.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let opts = &self.options;
        check_range_limit(opts.range, self.config)?;

        let property = require_property(conn, &opts.property_id)?;
        authorize_management(&opts.actor, &property)?;

        let existing = Database::query_availability(conn, &opts.property_id, opts.range)?.len();

        let mut plan = OperationPlan::new(format!(
            "Publish {} for property {}",
            opts.range, opts.property_id
        ))
        .add_action(PlanAction::PublishRange {
            actor: opts.actor.clone(),
            property_id: opts.property_id.clone(),
            range: opts.range,
            is_available: opts.is_available,
            price: opts.price,
        });

        if existing > 0 {
            plan = plan.add_warning(format!(
                "{existing} of {} day(s) already published and will be kept",
                opts.range.len()
            ));
        }

        log::debug!("planned publishing {} for {}", opts.range, opts.property_id);
        Ok(plan)
    }
}

/// Fails with `InvalidRange` if `range` exceeds `config.max_range_days()`.
pub(crate) fn check_range_limit(range: DateRange, config: &Config) -> Result<()> {
    let limit = usize::try_from(config.max_range_days()).unwrap_or(usize::MAX);
    if range.len() > limit {
        return Err(Error::InvalidRange {
            start: range.start(),
            end: range.end(),
            reason: format!("{} days exceeds the limit of {limit}", range.len()),
        });
    }
    Ok(())
}
