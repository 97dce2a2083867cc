//! Per-day availability records.
//!
//! Each property has at most one [`Availability`] row per calendar day. A row
//! is created open or closed by a host or admin, and afterwards only its
//! `is_available` flag and `booking_id` change, always through a [`DayMark`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::BookingId;
use crate::model::{Money, PropertyId, ValidationError};

/// Open/closed state of one property-day.
///
/// # Examples
///
/// ```
/// use lodge::{Availability, Money, PropertyId};
/// use lodge::calendar::parse_day;
///
/// let day = Availability::builder(PropertyId::new("villa").unwrap(), parse_day("2024-06-10").unwrap())
///     .price(Some(Money::from_units(100).unwrap()))
///     .build()
///     .unwrap();
///
/// assert!(day.is_available());
/// assert!(day.booking_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    property_id: PropertyId,
    date: NaiveDate,
    is_available: bool,
    price: Option<Money>,
    booking_id: Option<BookingId>,
}

impl Availability {
    /// Creates a builder for an open day with no price.
    #[must_use]
    pub fn builder(property_id: PropertyId, date: NaiveDate) -> AvailabilityBuilder {
        AvailabilityBuilder {
            property_id,
            date,
            is_available: true,
            price: None,
            booking_id: None,
        }
    }

    /// Returns the property this day belongs to.
    #[must_use]
    pub const fn property_id(&self) -> &PropertyId {
        &self.property_id
    }

    /// Returns the calendar day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns true if the day can be reserved.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }

    /// Returns the nightly price for this day, if one was set.
    #[must_use]
    pub const fn price(&self) -> Option<Money> {
        self.price
    }

    /// Returns the booking holding this day, if any.
    #[must_use]
    pub const fn booking_id(&self) -> Option<BookingId> {
        self.booking_id
    }
}

/// Builder for [`Availability`] rows.
#[derive(Debug)]
pub struct AvailabilityBuilder {
    property_id: PropertyId,
    date: NaiveDate,
    is_available: bool,
    price: Option<Money>,
    booking_id: Option<BookingId>,
}

impl AvailabilityBuilder {
    /// Sets whether the day is open.
    #[must_use]
    pub const fn available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    /// Sets the nightly price.
    #[must_use]
    pub const fn price(mut self, price: Option<Money>) -> Self {
        self.price = price;
        self
    }

    /// Sets the booking holding this day.
    #[must_use]
    pub const fn booking_id(mut self, booking_id: Option<BookingId>) -> Self {
        self.booking_id = booking_id;
        self
    }

    /// Builds the row.
    ///
    /// # Errors
    ///
    /// Returns an error if an open day references a booking.
    pub fn build(self) -> Result<Availability, ValidationError> {
        if self.is_available && self.booking_id.is_some() {
            return Err(ValidationError::new(
                "booking_id",
                "an open day cannot be held by a booking",
            ));
        }

        Ok(Availability {
            property_id: self.property_id,
            date: self.date,
            is_available: self.is_available,
            price: self.price,
            booking_id: self.booking_id,
        })
    }
}

/// A bulk change to the days of a range.
///
/// Marks never create rows. Days missing from the store are left missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMark {
    /// Close every currently open day and link it to the booking.
    ///
    /// Days that are already closed are not touched, so the affected-row
    /// count tells the caller whether the whole range was claimed.
    Hold(BookingId),
    /// Reopen every day held by the booking and clear the link.
    ///
    /// Days held by a different booking are not touched.
    Release(BookingId),
}

impl DayMark {
    /// Returns the booking this mark concerns.
    #[must_use]
    pub const fn booking_id(self) -> BookingId {
        match self {
            Self::Hold(id) | Self::Release(id) => id,
        }
    }
}
