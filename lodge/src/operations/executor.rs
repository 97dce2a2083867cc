//! Plan execution engine.
//!
//! The executor applies a plan's actions inside one immediate transaction.
//! Every check the planner made is repeated against the locked database,
//! since the planner's reads may be stale by the time the plan runs.

use rusqlite::Connection;

use crate::availability::{Availability, DayMark};
use crate::booking::policy::{actor_owns, authorize_deletion, authorize_transition};
use crate::booking::{Booking, BookingId, BookingStatus};
use crate::calendar::DateRange;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::model::{Actor, Money, PropertyId, UserId};
use crate::property::{authorize_management, require_property};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The booking created or changed, if any.
    pub booking: Option<Booking>,

    /// Availability rows created or covered by publishing.
    pub availability: Vec<Availability>,

    /// The booking that was deleted, if any.
    pub deleted: Option<BookingId>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            booking: None,
            availability: Vec::new(),
            deleted: None,
        }
    }
}

/// Executes operation plans against the database.
///
/// # Examples
///
/// ```no_run
/// use lodge::config::Config;
/// use lodge::operations::{PlanExecutor, ReserveOptions, ReservePlan};
/// use lodge::{Actor, Database, DatabaseConfig, DateRange, PropertyId, Role, UserId};
/// use chrono::NaiveDate;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/lodge.db")).unwrap();
/// let config = Config::default();
/// let guest = Actor::new(UserId::new("gina").unwrap(), Role::User);
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
/// )
/// .unwrap();
///
/// let options = ReserveOptions::new(guest, PropertyId::new("villa").unwrap(), range);
/// let plan = ReservePlan::new(options, &config).build_plan(db.connection()).unwrap();
///
/// let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
/// println!("{:?}", result.booking);
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// A dry run reports what the plan would do and never touches the
    /// database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// All actions commit together or not at all.
    ///
    /// # Errors
    ///
    /// Returns the first action's error after rolling back, or `LockTimeout`
    /// if the write lock could not be taken.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            log::debug!("dry run: {}", plan.description);
            return Ok(ExecutionResult::new(plan, true));
        }

        if plan.is_empty() {
            return Ok(ExecutionResult::new(plan, false));
        }

        let result = self.db.with_immediate_transaction(|tx| {
            let mut result = ExecutionResult::new(plan, false);
            for action in &plan.actions {
                apply_action(tx, action, &mut result)?;
            }
            Ok(result)
        })?;

        log::debug!("executed: {}", plan.description);
        Ok(result)
    }
}

fn apply_action(conn: &Connection, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
    match action {
        PlanAction::PublishDay { actor, day } => {
            result.availability.push(publish_day(conn, actor, day)?);
        }
        PlanAction::PublishRange {
            actor,
            property_id,
            range,
            is_available,
            price,
        } => {
            result.availability = publish_range(
                conn,
                actor,
                property_id,
                *range,
                *is_available,
                *price,
            )?;
        }
        PlanAction::Reserve {
            property_id,
            guest_id,
            range,
        } => {
            result.booking = Some(reserve(conn, property_id, guest_id, *range)?);
        }
        PlanAction::Transition {
            booking_id,
            to,
            actor,
        } => {
            result.booking = Some(transition(conn, *booking_id, *to, actor)?);
        }
        PlanAction::Delete { booking_id, actor } => {
            delete(conn, *booking_id, actor)?;
            result.deleted = Some(*booking_id);
        }
    }
    Ok(())
}

fn publish_day(conn: &Connection, actor: &Actor, day: &Availability) -> Result<Availability> {
    let property = require_property(conn, day.property_id())?;
    authorize_management(actor, &property)?;

    Database::insert_availability(conn, day)?;
    log::info!("published {} for property {}", day.date(), day.property_id());
    Ok(day.clone())
}

fn publish_range(
    conn: &Connection,
    actor: &Actor,
    property_id: &PropertyId,
    range: DateRange,
    is_available: bool,
    price: Option<Money>,
) -> Result<Vec<Availability>> {
    let property = require_property(conn, property_id)?;
    authorize_management(actor, &property)?;

    let price = price.unwrap_or(property.price);
    let mut created = 0usize;
    for date in range {
        let day = Availability::builder(property_id.clone(), date)
            .available(is_available)
            .price(Some(price))
            .build()?;
        if Database::insert_availability_if_absent(conn, &day)? {
            created += 1;
        }
    }

    log::info!(
        "published {range} for property {property_id}: {created} created, {} kept",
        range.len() - created
    );
    Database::query_availability(conn, property_id, range)
}

fn reserve(
    conn: &Connection,
    property_id: &PropertyId,
    guest_id: &UserId,
    range: DateRange,
) -> Result<Booking> {
    let property = require_property(conn, property_id)?;

    let open_days = Database::count_open_days(conn, property_id, range)?;
    if open_days != range.len() {
        log::info!(
            "rejected reservation of {property_id} {range}: {open_days} of {} day(s) open",
            range.len()
        );
        return Err(Error::Unavailable {
            property_id: property_id.to_string(),
            start: range.start(),
            end: range.end(),
            open_days,
            requested_days: range.len(),
        });
    }

    let total = property.price.for_nights(range.len())?;
    let booking = Database::insert_booking(conn, property_id, guest_id, range, total)?;

    let held = Database::mark_range(conn, property_id, range, DayMark::Hold(booking.id()))?;
    if held != range.len() {
        return Err(Error::Conflict {
            details: format!(
                "only {held} of {} day(s) of {property_id} {range} could be held",
                range.len()
            ),
        });
    }

    log::info!(
        "reserved {property_id} {range} as booking {} for {guest_id}, total {total}",
        booking.id()
    );
    Ok(booking)
}

fn load_booking(conn: &Connection, id: BookingId) -> Result<Booking> {
    Database::get_booking(conn, id)?.ok_or_else(|| Error::not_found(format!("booking {id}")))
}

fn release(conn: &Connection, booking: &Booking) -> Result<usize> {
    let released = Database::mark_range(
        conn,
        booking.property_id(),
        booking.dates(),
        DayMark::Release(booking.id()),
    )?;
    if booking.status().is_active() && released < booking.dates().len() {
        log::warn!(
            "booking {} held only {released} of {} day(s)",
            booking.id(),
            booking.dates().len()
        );
    }
    Ok(released)
}

fn transition(
    conn: &Connection,
    id: BookingId,
    to: BookingStatus,
    actor: &Actor,
) -> Result<Booking> {
    let booking = load_booking(conn, id)?;
    let is_owner = actor_owns(conn, actor, &booking)?;
    authorize_transition(actor.role, is_owner, booking.status(), to)?;

    if to == BookingStatus::Cancelled {
        let released = release(conn, &booking)?;
        log::info!("released {released} day(s) of booking {id}");
    }

    if !Database::update_booking_status_if(conn, id, booking.status(), to)? {
        return Err(Error::Conflict {
            details: format!("booking {id} changed while being updated"),
        });
    }

    log::info!("booking {id}: {} -> {to} by {actor}", booking.status());
    load_booking(conn, id)
}

fn delete(conn: &Connection, id: BookingId, actor: &Actor) -> Result<()> {
    let booking = load_booking(conn, id)?;
    let is_owner = actor_owns(conn, actor, &booking)?;
    authorize_deletion(actor.role, is_owner, booking.status())?;

    let released = release(conn, &booking)?;
    if !Database::delete_booking(conn, id)? {
        return Err(Error::Conflict {
            details: format!("booking {id} was deleted concurrently"),
        });
    }

    log::info!("deleted booking {id} by {actor}, released {released} day(s)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_day;
    use crate::database::test_util::{create_test_database, open_test_days, register_test_property};
    use crate::model::Role;
    use crate::ErrorKind;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(parse_day(start).unwrap(), parse_day(end).unwrap()).unwrap()
    }

    fn actor(id: &str, role: Role) -> Actor {
        Actor::new(UserId::new(id).unwrap(), role)
    }

    fn reserve_plan(property: &str, guest: &str, start: &str, end: &str) -> OperationPlan {
        OperationPlan::new("reserve").add_action(PlanAction::Reserve {
            property_id: PropertyId::new(property).unwrap(),
            guest_id: UserId::new(guest).unwrap(),
            range: range(start, end),
        })
    }

    fn days(db: &Database, start: &str, end: &str) -> Vec<Availability> {
        Database::query_availability(
            db.connection(),
            &PropertyId::new("villa").unwrap(),
            range(start, end),
        )
        .unwrap()
    }

    #[test]
    fn test_reserve_holds_every_day() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-12", None);

        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-12");
        let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();

        let booking = result.booking.unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.total_price(), Money::from_units(300).unwrap());
        for day in days(&db, "2024-06-10", "2024-06-12") {
            assert!(!day.is_available());
            assert_eq!(day.booking_id(), Some(booking.id()));
        }
    }

    #[test]
    fn test_reserve_total_uses_property_price() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        // Per-day prices are published data only; they never change the total.
        open_test_days(&db, &property, "2024-06-10", "2024-06-10", Some(150));
        open_test_days(&db, &property, "2024-06-11", "2024-06-11", None);

        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-11");
        let booking = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .booking
            .unwrap();
        assert_eq!(booking.total_price(), Money::from_units(200).unwrap());
    }

    #[test]
    fn test_reserve_with_missing_day_is_unavailable_and_writes_nothing() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-10", None);
        open_test_days(&db, &property, "2024-06-12", "2024-06-12", None);

        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-12");
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();

        assert!(matches!(
            err,
            Error::Unavailable {
                open_days: 2,
                requested_days: 3,
                ..
            }
        ));
        assert!(Database::list_all_bookings(db.connection()).unwrap().is_empty());
        assert!(days(&db, "2024-06-10", "2024-06-12")
            .iter()
            .all(Availability::is_available));
    }

    #[test]
    fn test_reserve_unknown_property() {
        let mut db = create_test_database();
        let plan = reserve_plan("ghost", "gina", "2024-06-10", "2024-06-10");
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_cancel_releases_days() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-12", Some(120));

        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-12");
        let booking = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .booking
            .unwrap();

        let cancel = OperationPlan::new("cancel").add_action(PlanAction::Transition {
            booking_id: booking.id(),
            to: BookingStatus::Cancelled,
            actor: actor("gina", Role::User),
        });
        let cancelled = PlanExecutor::new(&mut db)
            .execute(&cancel)
            .unwrap()
            .booking
            .unwrap();

        assert_eq!(cancelled.status(), BookingStatus::Cancelled);
        for day in days(&db, "2024-06-10", "2024-06-12") {
            assert!(day.is_available());
            assert_eq!(day.booking_id(), None);
            assert_eq!(day.price(), Some(Money::from_units(120).unwrap()));
        }
    }

    #[test]
    fn test_confirm_keeps_days_held() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-11", None);
        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-11");
        let booking = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .booking
            .unwrap();

        let confirm = OperationPlan::new("confirm").add_action(PlanAction::Transition {
            booking_id: booking.id(),
            to: BookingStatus::Confirmed,
            actor: actor("hannah", Role::Host),
        });
        let confirmed = PlanExecutor::new(&mut db)
            .execute(&confirm)
            .unwrap()
            .booking
            .unwrap();

        assert_eq!(confirmed.status(), BookingStatus::Confirmed);
        assert!(days(&db, "2024-06-10", "2024-06-11")
            .iter()
            .all(|d| d.booking_id() == Some(booking.id())));
    }

    #[test]
    fn test_delete_releases_and_removes() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-10", None);
        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-10");
        let booking = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .booking
            .unwrap();

        let delete = OperationPlan::new("delete").add_action(PlanAction::Delete {
            booking_id: booking.id(),
            actor: actor("root", Role::Admin),
        });
        let result = PlanExecutor::new(&mut db).execute(&delete).unwrap();

        assert_eq!(result.deleted, Some(booking.id()));
        assert!(Database::get_booking(db.connection(), booking.id())
            .unwrap()
            .is_none());
        assert!(days(&db, "2024-06-10", "2024-06-10")[0].is_available());
    }

    #[test]
    fn test_failed_action_rolls_back_earlier_actions() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-10", None);

        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-10").add_action(
            PlanAction::Reserve {
                property_id: PropertyId::new("villa").unwrap(),
                guest_id: UserId::new("otto").unwrap(),
                range: range("2024-06-10", "2024-06-10"),
            },
        );
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(Database::list_all_bookings(db.connection()).unwrap().is_empty());
        assert!(days(&db, "2024-06-10", "2024-06-10")[0].is_available());
    }

    #[test]
    fn test_dry_run_makes_no_changes() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-10", None);

        let plan = reserve_plan("villa", "gina", "2024-06-10", "2024-06-10");
        let result = PlanExecutor::new(&mut db).dry_run().execute(&plan).unwrap();

        assert!(result.dry_run);
        assert!(result.booking.is_none());
        assert_eq!(result.actions_taken.len(), 1);
        assert!(Database::list_all_bookings(db.connection()).unwrap().is_empty());
    }

    #[test]
    fn test_publish_range_requires_management_rights() {
        let mut db = create_test_database();
        register_test_property(&db, "villa", "hannah", 100);

        let plan = OperationPlan::new("publish").add_action(PlanAction::PublishRange {
            actor: actor("otto", Role::Host),
            property_id: PropertyId::new("villa").unwrap(),
            range: range("2024-06-10", "2024-06-12"),
            is_available: true,
            price: None,
        });
        let err = PlanExecutor::new(&mut db).execute(&plan).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(days(&db, "2024-06-10", "2024-06-12").is_empty());
    }

    #[test]
    fn test_publish_range_defaults_to_base_price_and_keeps_existing() {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-11", "2024-06-11", Some(175));

        let plan = OperationPlan::new("publish").add_action(PlanAction::PublishRange {
            actor: actor("hannah", Role::Host),
            property_id: property.id.clone(),
            range: range("2024-06-10", "2024-06-12"),
            is_available: true,
            price: None,
        });
        let rows = PlanExecutor::new(&mut db)
            .execute(&plan)
            .unwrap()
            .availability;

        let prices: Vec<_> = rows.iter().map(|d| d.price().unwrap().cents()).collect();
        assert_eq!(prices, vec![10_000, 17_500, 10_000]);
    }
}
