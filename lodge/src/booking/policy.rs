//! Role rules for booking status changes and deletion.
//!
//! Decisions are pure functions of the actor's role, whether the actor owns
//! the booking, and the statuses involved. Ownership means "is the guest" for
//! users and "owns the property" for hosts; admins are never checked for it.
//!
//! | Role  | Status changes                    | Deletion                    |
//! |-------|-----------------------------------|-----------------------------|
//! | User  | to `CANCELLED` only               | unless `CONFIRMED`          |
//! | Host  | to `CONFIRMED` or `CANCELLED`     | any status                  |
//! | Admin | any state machine edge            | any status                  |
//!
//! Ownership is checked before anything else and fails with `Unauthorized`.
//! State machine and role target violations fail with `InvalidTransition`.

use crate::booking::{Booking, BookingStatus};
use crate::error::{Error, Result};
use crate::model::{Actor, Role};
use crate::property::{require_property, PropertyDirectory};

/// Decides whether a status change is allowed.
///
/// # Errors
///
/// Returns `Unauthorized` if a user or host does not own the booking, and
/// `InvalidTransition` if the change is not an edge of the state machine or
/// not a target the role may request.
///
/// # Examples
///
/// ```
/// use lodge::booking::policy::authorize_transition;
/// use lodge::{BookingStatus, ErrorKind, Role};
///
/// assert!(authorize_transition(Role::Host, true, BookingStatus::Pending, BookingStatus::Confirmed).is_ok());
///
/// let err = authorize_transition(Role::User, true, BookingStatus::Pending, BookingStatus::Confirmed).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidTransition);
///
/// let err = authorize_transition(Role::User, false, BookingStatus::Pending, BookingStatus::Cancelled).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Unauthorized);
/// ```
pub fn authorize_transition(
    role: Role,
    is_owner: bool,
    current: BookingStatus,
    requested: BookingStatus,
) -> Result<()> {
    require_ownership(role, is_owner, "change the status of")?;

    let refuse = |reason: &str| {
        Err(Error::InvalidTransition {
            from: current,
            to: requested,
            reason: reason.to_string(),
        })
    };

    if current == requested {
        return refuse("booking already has this status");
    }
    if !current.can_transition_to(requested) {
        return refuse(match current {
            BookingStatus::Cancelled => "a cancelled booking cannot be revived",
            _ => "not an allowed status change",
        });
    }
    if role == Role::User && requested != BookingStatus::Cancelled {
        return refuse("guests may only cancel their bookings");
    }

    Ok(())
}

/// Decides whether a booking may be deleted.
///
/// # Errors
///
/// Returns `Unauthorized` if a user or host does not own the booking, or if a
/// guest tries to delete a confirmed booking.
pub fn authorize_deletion(role: Role, is_owner: bool, current: BookingStatus) -> Result<()> {
    require_ownership(role, is_owner, "delete")?;

    if role == Role::User && current == BookingStatus::Confirmed {
        return Err(Error::unauthorized(
            "guests cannot delete a confirmed booking",
        ));
    }

    Ok(())
}

fn require_ownership(role: Role, is_owner: bool, action: &str) -> Result<()> {
    match (role, is_owner) {
        (Role::Admin, _) | (_, true) => Ok(()),
        (Role::User, false) => Err(Error::unauthorized(format!(
            "only the guest may {action} this booking"
        ))),
        (Role::Host, false) => Err(Error::unauthorized(format!(
            "only the property's host may {action} this booking"
        ))),
    }
}

/// Resolves whether `actor` owns `booking` for the purposes of this policy.
///
/// Users own their own bookings. Hosts own bookings on their properties,
/// which requires a property lookup. Admins are reported as owners without
/// a lookup.
///
/// # Errors
///
/// Returns `NotFound` if a host's ownership check references a missing
/// property, or the lookup error.
pub fn actor_owns<D>(directory: &D, actor: &Actor, booking: &Booking) -> Result<bool>
where
    D: PropertyDirectory + ?Sized,
{
    match actor.role {
        Role::Admin => Ok(true),
        Role::User => Ok(booking.guest_id() == &actor.id),
        Role::Host => {
            let property = require_property(directory, booking.property_id())?;
            Ok(property.owner_id == actor.id)
        }
    }
}
