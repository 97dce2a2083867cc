//! Booking status change and deletion plans.

use rusqlite::Connection;

use crate::booking::policy::{actor_owns, authorize_deletion, authorize_transition};
use crate::booking::{Booking, BookingId, BookingStatus};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::model::Actor;

use super::plan::{OperationPlan, PlanAction};

fn require_booking(conn: &Connection, id: BookingId) -> Result<Booking> {
    Database::get_booking(conn, id)?.ok_or_else(|| Error::not_found(format!("booking {id}")))
}

/// Options for changing a booking's status.
#[derive(Debug, Clone)]
pub struct SetStatusOptions {
    /// The actor requesting the change.
    pub actor: Actor,
    /// The booking to change.
    pub booking_id: BookingId,
    /// The requested status.
    pub status: BookingStatus,
}

impl SetStatusOptions {
    /// Creates status change options.
    #[must_use]
    pub const fn new(actor: Actor, booking_id: BookingId, status: BookingStatus) -> Self {
        Self {
            actor,
            booking_id,
            status,
        }
    }
}

/// Plans a booking status change.
///
/// Moving to `CANCELLED` also releases the booking's days when executed.
pub struct SetStatusPlan {
    options: SetStatusOptions,
}

impl SetStatusPlan {
    /// Creates a planner for `options`.
    #[must_use]
    pub const fn new(options: SetStatusOptions) -> Self {
        Self { options }
    }

    /// Validates the request and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown booking, `Unauthorized` if the
    /// actor does not own it, and `InvalidTransition` if the change is not
    /// allowed.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let opts = &self.options;
        let booking = require_booking(conn, opts.booking_id)?;
        let is_owner = actor_owns(conn, &opts.actor, &booking)?;
        authorize_transition(opts.actor.role, is_owner, booking.status(), opts.status)?;

        let mut plan = OperationPlan::new(format!(
            "Change booking {} from {} to {}",
            booking.id(),
            booking.status(),
            opts.status
        ))
        .add_action(PlanAction::Transition {
            booking_id: booking.id(),
            to: opts.status,
            actor: opts.actor.clone(),
        });

        if opts.status == BookingStatus::Cancelled {
            plan = plan.add_warning(format!(
                "{} day(s) from {} will be released",
                booking.dates().len(),
                booking.dates()
            ));
        }

        Ok(plan)
    }
}

/// Options for deleting a booking.
#[derive(Debug, Clone)]
pub struct DeleteOptions {
    /// The actor requesting the deletion.
    pub actor: Actor,
    /// The booking to delete.
    pub booking_id: BookingId,
}

impl DeleteOptions {
    /// Creates deletion options.
    #[must_use]
    pub const fn new(actor: Actor, booking_id: BookingId) -> Self {
        Self { actor, booking_id }
    }
}

/// Plans a booking deletion.
pub struct DeletePlan {
    options: DeleteOptions,
}

impl DeletePlan {
    /// Creates a planner for `options`.
    #[must_use]
    pub const fn new(options: DeleteOptions) -> Self {
        Self { options }
    }

    /// Validates the request and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown booking and `Unauthorized` if the
    /// actor may not delete it.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let opts = &self.options;
        let booking = require_booking(conn, opts.booking_id)?;
        let is_owner = actor_owns(conn, &opts.actor, &booking)?;
        authorize_deletion(opts.actor.role, is_owner, booking.status())?;

        let mut plan = OperationPlan::new(format!("Delete booking {}", booking.id())).add_action(
            PlanAction::Delete {
                booking_id: booking.id(),
                actor: opts.actor.clone(),
            },
        );

        if booking.status().is_active() {
            plan = plan.add_warning(format!(
                "booking {} is {}; its days will be released",
                booking.id(),
                booking.status()
            ));
        }

        Ok(plan)
    }
}
