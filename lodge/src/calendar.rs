//! Calendar day ranges.
//!
//! Availability and bookings are tracked at whole-day resolution. This module
//! provides the inclusive [`DateRange`] type used everywhere a span of nights
//! is requested, together with the day arithmetic the engine relies on.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text format used for calendar days in storage and on the command line.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar day.
///
/// # Errors
///
/// Returns an error if the text is not a valid calendar day.
///
/// # Examples
///
/// ```
/// use lodge::calendar::parse_day;
///
/// let day = parse_day("2024-02-29").unwrap();
/// assert_eq!(day.to_string(), "2024-02-29");
/// assert!(parse_day("2023-02-29").is_err());
/// ```
pub fn parse_day(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), DAY_FORMAT)
}

/// An inclusive range of calendar days.
///
/// Both `start` and `end` belong to the range, so a range whose start equals
/// its end covers exactly one day.
///
/// # Examples
///
/// ```
/// use lodge::DateRange;
/// use lodge::calendar::parse_day;
///
/// let range = DateRange::new(parse_day("2024-03-01").unwrap(), parse_day("2024-03-03").unwrap()).unwrap();
/// assert_eq!(range.len(), 3);
/// assert!(range.contains(parse_day("2024-03-02").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form of a [`DateRange`].
#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = InvalidDateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a new inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRangeError> {
        if end < start {
            Err(InvalidDateRangeError {
                start,
                end,
                reason: "end date must not precede start date".into(),
            })
        } else {
            Ok(Self { start, end })
        }
    }

    /// Creates a range covering a single day.
    #[must_use]
    pub const fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the number of days in the range: `(end - start) + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::DateRange;
    /// use lodge::calendar::parse_day;
    ///
    /// let leap = DateRange::new(parse_day("2024-02-28").unwrap(), parse_day("2024-03-01").unwrap()).unwrap();
    /// assert_eq!(leap.len(), 3);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        // end >= start is guaranteed by construction.
        (self.end.signed_duration_since(self.start).num_days() + 1) as usize
    }

    /// Always false; a valid range holds at least one day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `day` falls within the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Returns `true` if the two ranges share at least one day.
    ///
    /// # Examples
    ///
    /// ```
    /// use lodge::DateRange;
    /// use lodge::calendar::parse_day;
    ///
    /// let a = DateRange::new(parse_day("2024-06-10").unwrap(), parse_day("2024-06-12").unwrap()).unwrap();
    /// let b = DateRange::new(parse_day("2024-06-12").unwrap(), parse_day("2024-06-13").unwrap()).unwrap();
    /// let c = DateRange::single(parse_day("2024-06-14").unwrap());
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns an iterator over every day in the range, in ascending order.
    #[must_use]
    pub fn days(self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if current > self.end {
            self.next = None;
            return None;
        }
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) if next <= self.end => {
                let remaining = (self.end.signed_duration_since(next).num_days() + 1) as usize;
                (remaining, Some(remaining))
            }
            _ => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for Days {}

/// Error type for inverted date ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateRangeError {
    /// The requested first day.
    pub start: NaiveDate,
    /// The requested last day.
    pub end: NaiveDate,
    /// The reason the range is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidDateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid date range {}..{}: {}",
            self.start, self.end, self.reason
        )
    }
}

impl std::error::Error for InvalidDateRangeError {}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
