//! Bookings and their status.
//!
//! A [`Booking`] claims an inclusive range of days at one property for one
//! guest. Its [`BookingStatus`] moves through a small state machine whose
//! role rules live in [`policy`].

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::model::{Money, PropertyId, UserId, ValidationError};

pub mod policy;

/// Store-assigned booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ValidationError::new(
                "booking_id",
                format!("'{s}' is not a booking id"),
            )),
        }
    }
}

/// Lifecycle status of a booking.
///
/// # Examples
///
/// ```
/// use lodge::BookingStatus;
///
/// let status: BookingStatus = "confirmed".parse().unwrap();
/// assert_eq!(status, BookingStatus::Confirmed);
/// assert_eq!(status.to_string(), "CONFIRMED");
/// assert!(BookingStatus::Pending.can_transition_to(status));
/// assert!(!status.can_transition_to(BookingStatus::Pending));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Requested by the guest, awaiting the host.
    Pending,
    /// Accepted by the host.
    Confirmed,
    /// Cancelled; the days have been released.
    Cancelled,
}

impl BookingStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    /// Returns the canonical text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns true while the booking holds its days.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Returns true if `next` is an edge of the state machine.
    ///
    /// The edges are `PENDING -> CONFIRMED`, `PENDING -> CANCELLED` and
    /// `CONFIRMED -> CANCELLED`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" | "CANCELED" => Ok(Self::Cancelled),
            _ => Err(ValidationError::new(
                "status",
                format!("unknown status '{s}', expected PENDING, CONFIRMED or CANCELLED"),
            )),
        }
    }
}

/// A guest's claim on a range of days at one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    property_id: PropertyId,
    guest_id: UserId,
    dates: DateRange,
    status: BookingStatus,
    total_price: Money,
    created_at: SystemTime,
    updated_at: SystemTime,
}

impl Booking {
    /// Creates a booking builder.
    #[must_use]
    pub fn builder(
        id: BookingId,
        property_id: PropertyId,
        guest_id: UserId,
        dates: DateRange,
    ) -> BookingBuilder {
        BookingBuilder {
            id,
            property_id,
            guest_id,
            dates,
            status: BookingStatus::Pending,
            total_price: Money::ZERO,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the booking identifier.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the booked property.
    #[must_use]
    pub const fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    /// Returns the guest who made the booking.
    #[must_use]
    pub const fn guest_id(&self) -> &UserId {
        &self.guest_id
    }

    /// Returns the booked days.
    #[must_use]
    pub const fn dates(&self) -> DateRange {
        self.dates
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the total price over all booked days.
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns the timestamp of the last status change.
    #[must_use]
    pub const fn updated_at(&self) -> SystemTime {
        self.updated_at
    }
}

/// Builder for [`Booking`] values read from storage or produced by a reservation.
#[derive(Debug)]
pub struct BookingBuilder {
    id: BookingId,
    property_id: PropertyId,
    guest_id: UserId,
    dates: DateRange,
    status: BookingStatus,
    total_price: Money,
    created_at: Option<SystemTime>,
    updated_at: Option<SystemTime>,
}

impl BookingBuilder {
    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the total price.
    #[must_use]
    pub const fn total_price(mut self, total_price: Money) -> Self {
        self.total_price = total_price;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the last-update timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: SystemTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the booking. Missing timestamps default to now.
    #[must_use]
    pub fn build(self) -> Booking {
        let now = SystemTime::now();
        let created_at = self.created_at.unwrap_or(now);
        Booking {
            id: self.id,
            property_id: self.property_id,
            guest_id: self.guest_id,
            dates: self.dates,
            status: self.status,
            total_price: self.total_price,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
