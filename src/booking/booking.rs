//! Booking record type.

use crate::error::StorefrontError;
use crate::ids::BookingRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A hotel room booking over a half-open date range
/// `[check_in, check_out)`.
///
/// Cancellation sets a flag rather than deleting the record; cancelled
/// bookings no longer block availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// Generated booking reference.
    pub reference: BookingRef,
    /// Guest the booking is held for.
    pub guest_name: String,
    /// Booked room number.
    pub room_number: u32,
    /// Check-in date (inclusive).
    pub check_in: NaiveDate,
    /// Check-out date (exclusive).
    pub check_out: NaiveDate,
    /// Number of guests.
    pub num_guests: u32,
    /// Whether the booking has been cancelled.
    pub cancelled: bool,
}

impl Booking {
    /// Create a validated booking with a fresh reference.
    ///
    /// Fails with [`StorefrontError::InvalidBooking`] when the guest name
    /// is empty, the check-out date is not after the check-in date, or the
    /// guest count is zero.
    pub fn new(
        guest_name: impl Into<String>,
        room_number: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        num_guests: u32,
    ) -> Result<Self, StorefrontError> {
        let guest_name = guest_name.into();
        if guest_name.is_empty() {
            return Err(StorefrontError::InvalidBooking(
                "guest name is required".to_string(),
            ));
        }
        if check_out <= check_in {
            return Err(StorefrontError::InvalidBooking(
                "check-out date must be after check-in date".to_string(),
            ));
        }
        if num_guests < 1 {
            return Err(StorefrontError::InvalidBooking(
                "number of guests must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            reference: BookingRef::generate(),
            guest_name,
            room_number,
            check_in,
            check_out,
            num_guests,
            cancelled: false,
        })
    }

    /// Number of nights. At least 1 by construction.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Whether this booking's range overlaps `[check_in, check_out)`.
    ///
    /// Half-open semantics: checking out the day another booking checks in
    /// is not an overlap.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }

    /// Whether the guest is in-house on the given date.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}
