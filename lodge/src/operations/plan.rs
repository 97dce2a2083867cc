//! Plan types for availability and booking operations.
//!
//! A plan describes what an operation will do without doing it. Each action
//! carries everything the executor needs to re-check and apply it.

use crate::availability::Availability;
use crate::booking::{BookingId, BookingStatus};
use crate::calendar::DateRange;
use crate::model::{Actor, Money, PropertyId, UserId};

/// A single action to be taken during plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Create one availability row, failing if the day already exists.
    PublishDay {
        /// The actor publishing the day.
        actor: Actor,
        /// The row to create.
        day: Availability,
    },

    /// Create a row for every day in a range that has none yet.
    PublishRange {
        /// The actor publishing the range.
        actor: Actor,
        /// The property being published.
        property_id: PropertyId,
        /// The days to cover.
        range: DateRange,
        /// Whether the new rows are open.
        is_available: bool,
        /// Nightly price; the property's base price when absent.
        price: Option<Money>,
    },

    /// Atomically hold every day of a range for a new booking.
    Reserve {
        /// The property to book.
        property_id: PropertyId,
        /// The guest the booking belongs to.
        guest_id: UserId,
        /// The days to hold.
        range: DateRange,
    },

    /// Move a booking to a new status, releasing its days on cancellation.
    Transition {
        /// The booking to change.
        booking_id: BookingId,
        /// The requested status.
        to: BookingStatus,
        /// The actor requesting the change.
        actor: Actor,
    },

    /// Release a booking's days and delete it.
    Delete {
        /// The booking to delete.
        booking_id: BookingId,
        /// The actor requesting the deletion.
        actor: Actor,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::operations::PlanAction;
    /// use lodge::{Actor, BookingId, Role, UserId};
    ///
    /// let action = PlanAction::Delete {
    ///     booking_id: BookingId::new(7),
    ///     actor: Actor::new(UserId::new("root").unwrap(), Role::Admin),
    /// };
    /// assert_eq!(action.description(), "Delete booking 7");
    /// ```
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::PublishDay { day, .. } => {
                let state = if day.is_available() { "open" } else { "closed" };
                format!(
                    "Publish {} as {state} for property {}",
                    day.date(),
                    day.property_id()
                )
            }
            Self::PublishRange {
                property_id,
                range,
                is_available,
                ..
            } => {
                let state = if *is_available { "open" } else { "closed" };
                format!(
                    "Publish {} day(s) from {} to {} as {state} for property {property_id}",
                    range.len(),
                    range.start(),
                    range.end()
                )
            }
            Self::Reserve {
                property_id,
                guest_id,
                range,
            } => format!(
                "Reserve property {property_id} from {} to {} for guest {guest_id}",
                range.start(),
                range.end()
            ),
            Self::Transition { booking_id, to, .. } => {
                format!("Set booking {booking_id} to {to}")
            }
            Self::Delete { booking_id, .. } => format!("Delete booking {booking_id}"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are built by the planners in this module and applied by a
/// [`PlanExecutor`](super::PlanExecutor).
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Reserve villa");
    /// assert_eq!(plan.description, "Reserve villa");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
