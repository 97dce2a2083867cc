//! Database CRUD operations for properties, availability and bookings.
//!
//! Functions take a plain `&Connection` so they run unchanged against a
//! connection or inside an open transaction (a `Transaction` derefs to a
//! `Connection`). Atomicity across several calls is the caller's job.

use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::availability::{Availability, DayMark};
use crate::booking::{Booking, BookingId, BookingStatus};
use crate::calendar::DateRange;
use crate::error::{Error, Result};
use crate::model::{Money, PropertyId, UserId};
use crate::property::{Property, PropertyDirectory};

use super::connection::Database;

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn money_column(row: &Row<'_>, column: usize) -> rusqlite::Result<Money> {
    Money::from_cents(row.get(column)?).map_err(|e| conversion_error(column, e))
}

/// Expects columns: `property_id, date, is_available, price, booking_id`.
fn row_to_availability(row: &Row<'_>) -> rusqlite::Result<Availability> {
    let property_id: String = row.get(0)?;
    let date: NaiveDate = row.get(1)?;
    let is_available: bool = row.get(2)?;
    let price = row
        .get::<_, Option<i64>>(3)?
        .map(Money::from_cents)
        .transpose()
        .map_err(|e| conversion_error(3, e))?;
    let booking_id: Option<i64> = row.get(4)?;

    let property_id = PropertyId::new(property_id).map_err(|e| conversion_error(0, e))?;
    Availability::builder(property_id, date)
        .available(is_available)
        .price(price)
        .booking_id(booking_id.map(BookingId::new))
        .build()
        .map_err(|e| conversion_error(4, e))
}

/// Expects columns: `id, property_id, guest_id, start_date, end_date, status,
/// total_price, created_at, updated_at`.
fn row_to_booking(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let id: i64 = row.get(0)?;
    let property_id: String = row.get(1)?;
    let guest_id: String = row.get(2)?;
    let start: NaiveDate = row.get(3)?;
    let end: NaiveDate = row.get(4)?;
    let status: String = row.get(5)?;
    let total_price = money_column(row, 6)?;
    let created_secs: i64 = row.get(7)?;
    let updated_secs: i64 = row.get(8)?;

    let property_id = PropertyId::new(property_id).map_err(|e| conversion_error(1, e))?;
    let guest_id = UserId::new(guest_id).map_err(|e| conversion_error(2, e))?;
    let dates = DateRange::new(start, end).map_err(|e| conversion_error(3, e))?;
    let status = status
        .parse::<BookingStatus>()
        .map_err(|e| conversion_error(5, e))?;

    Ok(
        Booking::builder(BookingId::new(id), property_id, guest_id, dates)
            .status(status)
            .total_price(total_price)
            .created_at(unix_secs_to_systemtime(created_secs))
            .updated_at(unix_secs_to_systemtime(updated_secs))
            .build(),
    )
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

const UPSERT_PROPERTY: &str = r"
    INSERT INTO properties (id, owner_id, price) VALUES (?1, ?2, ?3)
    ON CONFLICT (id) DO UPDATE SET owner_id = excluded.owner_id, price = excluded.price
";

const INSERT_AVAILABILITY: &str = r"
    INSERT INTO availability (property_id, date, is_available, price, booking_id)
    VALUES (?1, ?2, ?3, ?4, NULL)
";

const INSERT_AVAILABILITY_IF_ABSENT: &str = r"
    INSERT INTO availability (property_id, date, is_available, price, booking_id)
    VALUES (?1, ?2, ?3, ?4, NULL)
    ON CONFLICT (property_id, date) DO NOTHING
";

const SELECT_AVAILABILITY_RANGE: &str = r"
    SELECT property_id, date, is_available, price, booking_id
    FROM availability
    WHERE property_id = ?1 AND date BETWEEN ?2 AND ?3
    ORDER BY date
";

const COUNT_OPEN_DAYS: &str = r"
    SELECT COUNT(*)
    FROM availability
    WHERE property_id = ?1 AND date BETWEEN ?2 AND ?3 AND is_available = 1
";

const HOLD_RANGE: &str = r"
    UPDATE availability
    SET is_available = 0, booking_id = ?4
    WHERE property_id = ?1 AND date BETWEEN ?2 AND ?3 AND is_available = 1
";

const RELEASE_RANGE: &str = r"
    UPDATE availability
    SET is_available = 1, booking_id = NULL
    WHERE property_id = ?1 AND date BETWEEN ?2 AND ?3 AND booking_id = ?4
";

const BOOKING_COLUMNS: &str = "id, property_id, guest_id, start_date, end_date, status, \
                               total_price, created_at, updated_at";

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (property_id, guest_id, start_date, end_date, status, total_price, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
";

const UPDATE_BOOKING_STATUS_IF: &str = r"
    UPDATE bookings
    SET status = ?3, updated_at = ?4
    WHERE id = ?1 AND status = ?2
";

const DELETE_BOOKING: &str = "DELETE FROM bookings WHERE id = ?1";

impl Database {
    /// Inserts or updates a property record.
    ///
    /// This is the seam through which the property collaborator provides
    /// ownership and base prices.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn register_property(conn: &Connection, property: &Property) -> Result<()> {
        conn.execute(
            UPSERT_PROPERTY,
            params![
                property.id.as_str(),
                property.owner_id.as_str(),
                property.price.cents()
            ],
        )?;
        Ok(())
    }

    /// Looks up a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_property(conn: &Connection, id: &PropertyId) -> Result<Option<Property>> {
        conn.property(id)
    }

    /// Creates one availability row, failing if the day already exists.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if a row for `(property, date)` exists, or the
    /// database error.
    pub fn insert_availability(conn: &Connection, day: &Availability) -> Result<()> {
        conn.execute(
            INSERT_AVAILABILITY,
            params![
                day.property_id().as_str(),
                day.date(),
                day.is_available(),
                day.price().map(Money::cents),
            ],
        )
        .map_err(|e| {
            if is_primary_key_violation(&e) {
                Error::Conflict {
                    details: format!(
                        "availability for {} on {} already exists",
                        day.property_id(),
                        day.date()
                    ),
                }
            } else {
                e.into()
            }
        })?;
        Ok(())
    }

    /// Creates one availability row unless the day already exists.
    ///
    /// Returns `true` if a row was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn insert_availability_if_absent(conn: &Connection, day: &Availability) -> Result<bool> {
        let inserted = conn.execute(
            INSERT_AVAILABILITY_IF_ABSENT,
            params![
                day.property_id().as_str(),
                day.date(),
                day.is_available(),
                day.price().map(Money::cents),
            ],
        )?;
        Ok(inserted == 1)
    }

    /// Returns the existing rows in `range`, ordered by date.
    ///
    /// Days without a row are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn query_availability(
        conn: &Connection,
        property_id: &PropertyId,
        range: DateRange,
    ) -> Result<Vec<Availability>> {
        let mut stmt = conn.prepare_cached(SELECT_AVAILABILITY_RANGE)?;
        let rows = stmt
            .query_map(
                params![property_id.as_str(), range.start(), range.end()],
                row_to_availability,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Counts the open rows in `range`.
    ///
    /// Missing days have no row, so they are never counted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_open_days(
        conn: &Connection,
        property_id: &PropertyId,
        range: DateRange,
    ) -> Result<usize> {
        let count: i64 = conn.prepare_cached(COUNT_OPEN_DAYS)?.query_row(
            params![property_id.as_str(), range.start(), range.end()],
            |row| row.get(0),
        )?;
        usize::try_from(count).map_err(|e| Error::DatabaseCorruption {
            details: format!("negative open-day count: {e}"),
        })
    }

    /// Applies a [`DayMark`] to the existing rows in `range`.
    ///
    /// This is the only write path for `is_available` and `booking_id` after
    /// a row is created. Returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_range(
        conn: &Connection,
        property_id: &PropertyId,
        range: DateRange,
        mark: DayMark,
    ) -> Result<usize> {
        let sql = match mark {
            DayMark::Hold(_) => HOLD_RANGE,
            DayMark::Release(_) => RELEASE_RANGE,
        };
        let changed = conn.execute(
            sql,
            params![
                property_id.as_str(),
                range.start(),
                range.end(),
                mark.booking_id().get()
            ],
        )?;
        log::debug!("{mark:?} on {property_id} {range}: {changed} row(s)");
        Ok(changed)
    }

    /// Inserts a `PENDING` booking and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_booking(
        conn: &Connection,
        property_id: &PropertyId,
        guest_id: &UserId,
        dates: DateRange,
        total_price: Money,
    ) -> Result<Booking> {
        let now = SystemTime::now();
        conn.execute(
            INSERT_BOOKING,
            params![
                property_id.as_str(),
                guest_id.as_str(),
                dates.start(),
                dates.end(),
                BookingStatus::Pending.as_str(),
                total_price.cents(),
                systemtime_to_unix_secs(now)?,
            ],
        )?;
        let id = BookingId::new(conn.last_insert_rowid());

        Self::get_booking(conn, id)?.ok_or_else(|| Error::DatabaseCorruption {
            details: format!("booking {id} vanished after insert"),
        })
    }

    /// Retrieves a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(conn: &Connection, id: BookingId) -> Result<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
        let booking = conn
            .query_row(&sql, params![id.get()], row_to_booking)
            .optional()?;
        Ok(booking)
    }

    /// Sets a booking's status if it still has `expected`.
    ///
    /// Returns `false` if the booking is missing or its status changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_booking_status_if(
        conn: &Connection,
        id: BookingId,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> Result<bool> {
        let changed = conn.execute(
            UPDATE_BOOKING_STATUS_IF,
            params![
                id.get(),
                expected.as_str(),
                status.as_str(),
                systemtime_to_unix_secs(SystemTime::now())?,
            ],
        )?;
        Ok(changed == 1)
    }

    /// Deletes a booking. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking still holds days or the delete fails.
    pub fn delete_booking(conn: &Connection, id: BookingId) -> Result<bool> {
        Ok(conn.execute(DELETE_BOOKING, params![id.get()])? == 1)
    }

    /// Lists a guest's bookings ordered by start date, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_guest(conn: &Connection, guest_id: &UserId) -> Result<Vec<Booking>> {
        Self::list_bookings_where(conn, "guest_id = ?1", guest_id.as_str())
    }

    /// Lists a property's bookings ordered by start date, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_property(
        conn: &Connection,
        property_id: &PropertyId,
    ) -> Result<Vec<Booking>> {
        Self::list_bookings_where(conn, "property_id = ?1", property_id.as_str())
    }

    /// Lists every booking ordered by start date, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_bookings(conn: &Connection) -> Result<Vec<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY start_date, id");
        let mut stmt = conn.prepare(&sql)?;
        let bookings = stmt
            .query_map([], row_to_booking)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(bookings)
    }

    fn list_bookings_where(conn: &Connection, filter: &str, value: &str) -> Result<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE {filter} ORDER BY start_date, id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let bookings = stmt
            .query_map(params![value], row_to_booking)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(bookings)
    }

    /// Runs `PRAGMA integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseCorruption` if the check reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("integrity check failed: {result}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_day;
    use crate::database::test_util::{
        create_test_database, open_test_days, register_test_property,
    };
    use crate::ErrorKind;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(day(start), day(end)).unwrap()
    }

    #[test]
    fn test_register_property_upserts() {
        let db = create_test_database();
        let mut property = register_test_property(&db, "villa", "hannah", 100);

        property.price = Money::from_units(120).unwrap();
        Database::register_property(db.connection(), &property).unwrap();

        let loaded = Database::get_property(db.connection(), &property.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.price.to_string(), "120");
    }

    #[test]
    fn test_insert_availability_conflict() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        let row = Availability::builder(property.id.clone(), day("2024-06-10"))
            .build()
            .unwrap();

        Database::insert_availability(db.connection(), &row).unwrap();
        let err = Database::insert_availability(db.connection(), &row).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_insert_availability_unknown_property() {
        let db = create_test_database();
        let row = Availability::builder(PropertyId::new("ghost").unwrap(), day("2024-06-10"))
            .build()
            .unwrap();
        let err = Database::insert_availability(db.connection(), &row).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_insert_if_absent_keeps_existing() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        let closed = Availability::builder(property.id.clone(), day("2024-06-10"))
            .available(false)
            .build()
            .unwrap();
        let open = Availability::builder(property.id.clone(), day("2024-06-10"))
            .price(Some(Money::from_units(50).unwrap()))
            .build()
            .unwrap();

        assert!(Database::insert_availability_if_absent(db.connection(), &closed).unwrap());
        assert!(!Database::insert_availability_if_absent(db.connection(), &open).unwrap());

        let rows =
            Database::query_availability(db.connection(), &property.id, range("2024-06-10", "2024-06-10"))
                .unwrap();
        assert_eq!(rows, vec![closed]);
    }

    #[test]
    fn test_query_availability_ordered_and_sparse() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-12", "2024-06-12", None);
        open_test_days(&db, &property, "2024-06-10", "2024-06-10", None);

        let rows =
            Database::query_availability(db.connection(), &property.id, range("2024-06-09", "2024-06-13"))
                .unwrap();
        let dates: Vec<_> = rows.iter().map(|r| r.date().to_string()).collect();
        assert_eq!(dates, vec!["2024-06-10", "2024-06-12"]);
    }

    #[test]
    fn test_hold_only_touches_open_days() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-12", None);
        let dates = range("2024-06-10", "2024-06-12");

        let first = Database::insert_booking(
            db.connection(),
            &property.id,
            &UserId::new("gina").unwrap(),
            range("2024-06-11", "2024-06-11"),
            Money::ZERO,
        )
        .unwrap();
        let held = Database::mark_range(
            db.connection(),
            &property.id,
            range("2024-06-11", "2024-06-11"),
            DayMark::Hold(first.id()),
        )
        .unwrap();
        assert_eq!(held, 1);

        let second = Database::insert_booking(
            db.connection(),
            &property.id,
            &UserId::new("gus").unwrap(),
            dates,
            Money::ZERO,
        )
        .unwrap();
        let held =
            Database::mark_range(db.connection(), &property.id, dates, DayMark::Hold(second.id()))
                .unwrap();
        assert_eq!(held, 2);

        let rows = Database::query_availability(db.connection(), &property.id, dates).unwrap();
        assert_eq!(rows[1].booking_id(), Some(first.id()));
        assert_eq!(rows[0].booking_id(), Some(second.id()));
    }

    #[test]
    fn test_release_only_touches_own_days() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-12", None);
        let dates = range("2024-06-10", "2024-06-12");

        let mine = Database::insert_booking(
            db.connection(),
            &property.id,
            &UserId::new("gina").unwrap(),
            range("2024-06-10", "2024-06-11"),
            Money::ZERO,
        )
        .unwrap();
        Database::mark_range(db.connection(), &property.id, mine.dates(), DayMark::Hold(mine.id()))
            .unwrap();
        let theirs = Database::insert_booking(
            db.connection(),
            &property.id,
            &UserId::new("gus").unwrap(),
            range("2024-06-12", "2024-06-12"),
            Money::ZERO,
        )
        .unwrap();
        Database::mark_range(
            db.connection(),
            &property.id,
            theirs.dates(),
            DayMark::Hold(theirs.id()),
        )
        .unwrap();

        // Release over the whole span must leave the other booking's day alone.
        let released =
            Database::mark_range(db.connection(), &property.id, dates, DayMark::Release(mine.id()))
                .unwrap();
        assert_eq!(released, 2);

        let rows = Database::query_availability(db.connection(), &property.id, dates).unwrap();
        assert!(rows[0].is_available() && rows[1].is_available());
        assert_eq!(rows[2].booking_id(), Some(theirs.id()));
    }

    #[test]
    fn test_count_open_days_skips_closed_and_missing() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-11", None);
        let closed = Availability::builder(property.id.clone(), day("2024-06-12"))
            .available(false)
            .build()
            .unwrap();
        Database::insert_availability(db.connection(), &closed).unwrap();

        let open =
            Database::count_open_days(db.connection(), &property.id, range("2024-06-09", "2024-06-13"))
                .unwrap();
        assert_eq!(open, 2);
    }

    #[test]
    fn test_booking_round_trip_and_cas() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        let booking = Database::insert_booking(
            db.connection(),
            &property.id,
            &UserId::new("gina").unwrap(),
            range("2024-06-10", "2024-06-12"),
            Money::from_units(300).unwrap(),
        )
        .unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.total_price().to_string(), "300");

        let loaded = Database::get_booking(db.connection(), booking.id())
            .unwrap()
            .unwrap();
        assert_eq!(loaded.dates(), booking.dates());

        assert!(Database::update_booking_status_if(
            db.connection(),
            booking.id(),
            BookingStatus::Pending,
            BookingStatus::Confirmed
        )
        .unwrap());
        // Stale expectation loses.
        assert!(!Database::update_booking_status_if(
            db.connection(),
            booking.id(),
            BookingStatus::Pending,
            BookingStatus::Cancelled
        )
        .unwrap());

        assert!(Database::delete_booking(db.connection(), booking.id()).unwrap());
        assert!(!Database::delete_booking(db.connection(), booking.id()).unwrap());
        assert!(Database::get_booking(db.connection(), booking.id())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete_booking_holding_days_fails() {
        let db = create_test_database();
        let property = register_test_property(&db, "villa", "hannah", 100);
        open_test_days(&db, &property, "2024-06-10", "2024-06-10", None);
        let booking = Database::insert_booking(
            db.connection(),
            &property.id,
            &UserId::new("gina").unwrap(),
            range("2024-06-10", "2024-06-10"),
            Money::ZERO,
        )
        .unwrap();
        Database::mark_range(
            db.connection(),
            &property.id,
            booking.dates(),
            DayMark::Hold(booking.id()),
        )
        .unwrap();

        assert!(Database::delete_booking(db.connection(), booking.id()).is_err());
    }

    #[test]
    fn test_list_bookings_ordering() {
        let db = create_test_database();
        let villa = register_test_property(&db, "villa", "hannah", 100);
        let cabin = register_test_property(&db, "cabin", "hugo", 80);
        let gina = UserId::new("gina").unwrap();
        let gus = UserId::new("gus").unwrap();

        let late = Database::insert_booking(
            db.connection(),
            &villa.id,
            &gina,
            range("2024-07-01", "2024-07-02"),
            Money::ZERO,
        )
        .unwrap();
        let early = Database::insert_booking(
            db.connection(),
            &cabin.id,
            &gina,
            range("2024-06-01", "2024-06-02"),
            Money::ZERO,
        )
        .unwrap();
        let other = Database::insert_booking(
            db.connection(),
            &villa.id,
            &gus,
            range("2024-06-15", "2024-06-15"),
            Money::ZERO,
        )
        .unwrap();

        let ids = |bookings: Vec<Booking>| bookings.iter().map(Booking::id).collect::<Vec<_>>();

        assert_eq!(
            ids(Database::list_bookings_for_guest(db.connection(), &gina).unwrap()),
            vec![early.id(), late.id()]
        );
        assert_eq!(
            ids(Database::list_bookings_for_property(db.connection(), &villa.id).unwrap()),
            vec![other.id(), late.id()]
        );
        assert_eq!(
            ids(Database::list_all_bookings(db.connection()).unwrap()),
            vec![early.id(), other.id(), late.id()]
        );
    }

    #[test]
    fn test_verify_integrity() {
        let db = create_test_database();
        db.verify_integrity().unwrap();
    }
}
