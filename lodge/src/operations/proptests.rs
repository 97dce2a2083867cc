//! Property-based tests for reservation and release.
//!
//! Each case seeds a fresh database with a random pattern of open, closed
//! and missing days, so the case count is kept low.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use crate::availability::Availability;
use crate::booking::BookingStatus;
use crate::calendar::DateRange;
use crate::config::Config;
use crate::database::test_util::{create_test_database, register_test_property};
use crate::database::Database;
use crate::model::{Actor, Role, UserId};
use crate::operations::{
    PlanExecutor, ReserveOptions, ReservePlan, SetStatusOptions, SetStatusPlan,
};

const WINDOW: u64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayState {
    Missing,
    Open,
    Closed,
}

fn day_state_strategy() -> impl Strategy<Value = DayState> {
    prop_oneof![
        1 => Just(DayState::Missing),
        6 => Just(DayState::Open),
        1 => Just(DayState::Closed),
    ]
}

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn nth(offset: u64) -> NaiveDate {
    base().checked_add_days(Days::new(offset)).unwrap()
}

fn request_strategy() -> impl Strategy<Value = (u64, u64)> {
    (0..WINDOW).prop_flat_map(|start| (Just(start), start..WINDOW))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn reserve_succeeds_iff_every_day_is_open(
        states in prop::collection::vec(day_state_strategy(), WINDOW as usize),
        (start, end) in request_strategy()
    ) {
        let mut db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        for (offset, state) in (0u64..).zip(&states) {
            if *state == DayState::Missing {
                continue;
            }
            let day = Availability::builder(property.id.clone(), nth(offset))
                .available(*state == DayState::Open)
                .build()
                .unwrap();
            Database::insert_availability(db.connection(), &day).unwrap();
        }

        let range = DateRange::new(nth(start), nth(end)).unwrap();
        let requested = &states[usize::try_from(start).unwrap()..=usize::try_from(end).unwrap()];
        let all_open = requested.iter().all(|s| *s == DayState::Open);

        let guest = Actor::new(UserId::new("gina").unwrap(), Role::User);
        let config = Config::default();
        let options = ReserveOptions::new(guest.clone(), property.id.clone(), range);
        let outcome = ReservePlan::new(options, &config)
            .build_plan(db.connection())
            .and_then(|plan| PlanExecutor::new(&mut db).execute(&plan));

        prop_assert_eq!(outcome.is_ok(), all_open);
        if let Ok(result) = outcome {
            let booking = result.booking.unwrap();
            prop_assert_eq!(booking.total_price().cents(), 10_000 * i64::try_from(range.len()).unwrap());

            let held = Database::query_availability(db.connection(), &property.id, range).unwrap();
            prop_assert!(held.iter().all(|d| d.booking_id() == Some(booking.id())));

            let cancel = SetStatusPlan::new(SetStatusOptions::new(guest, booking.id(), BookingStatus::Cancelled))
                .build_plan(db.connection())
                .unwrap();
            PlanExecutor::new(&mut db).execute(&cancel).unwrap();

            let released = Database::query_availability(db.connection(), &property.id, range).unwrap();
            prop_assert!(released.iter().all(|d| d.is_available() && d.booking_id().is_none()));
        } else {
            prop_assert!(Database::list_all_bookings(db.connection()).unwrap().is_empty());
        }
    }
}
