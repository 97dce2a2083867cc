//! Read-only queries with role checks.
//!
//! Availability is public. Bookings are visible to their guest, the host of
//! the property, and admins.

use rusqlite::Connection;

use crate::availability::Availability;
use crate::booking::policy::actor_owns;
use crate::booking::{Booking, BookingId};
use crate::calendar::DateRange;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::model::{Actor, PropertyId};
use crate::property::{authorize_management, require_property};

/// Returns a property's existing availability rows in `range`, by date.
///
/// Days without a row are absent from the result.
///
/// # Errors
///
/// Returns `NotFound` for an unknown property, or the query error.
pub fn query_availability(
    conn: &Connection,
    property_id: &PropertyId,
    range: DateRange,
) -> Result<Vec<Availability>> {
    require_property(conn, property_id)?;
    Database::query_availability(conn, property_id, range)
}

/// Returns one booking visible to `actor`.
///
/// # Errors
///
/// Returns `NotFound` for an unknown booking and `Unauthorized` if the
/// actor is neither its guest, its property's host, nor an admin.
pub fn get_booking(conn: &Connection, actor: &Actor, id: BookingId) -> Result<Booking> {
    let booking =
        Database::get_booking(conn, id)?.ok_or_else(|| Error::not_found(format!("booking {id}")))?;
    if !actor_owns(conn, actor, &booking)? {
        return Err(Error::unauthorized(format!(
            "{actor} may not view booking {id}"
        )));
    }
    Ok(booking)
}

/// Lists the actor's own bookings, ordered by start date.
///
/// # Errors
///
/// Returns the query error.
pub fn list_bookings_for_guest(conn: &Connection, actor: &Actor) -> Result<Vec<Booking>> {
    Database::list_bookings_for_guest(conn, &actor.id)
}

/// Lists a property's bookings for an admin or its host.
///
/// # Errors
///
/// Returns `NotFound` for an unknown property and `Unauthorized` for
/// anyone else.
pub fn list_bookings_for_property(
    conn: &Connection,
    actor: &Actor,
    property_id: &PropertyId,
) -> Result<Vec<Booking>> {
    let property = require_property(conn, property_id)?;
    authorize_management(actor, &property)?;
    Database::list_bookings_for_property(conn, property_id)
}

/// Lists every booking. Admin only.
///
/// # Errors
///
/// Returns `Unauthorized` for non-admins, or the query error.
pub fn list_all_bookings(conn: &Connection, actor: &Actor) -> Result<Vec<Booking>> {
    if !actor.is_admin() {
        return Err(Error::unauthorized(format!(
            "{actor} may not list all bookings"
        )));
    }
    Database::list_all_bookings(conn)
}
