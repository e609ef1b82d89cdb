//! Reservation system.

use crate::booking::{Booking, Room, RoomType};
use crate::error::StorefrontError;
use crate::ids::BookingRef;
use crate::money::{Currency, Money};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Pricing and refund tunables for a [`BookingSystem`].
///
/// Carried explicitly so there is no module-level configuration state; a
/// system is constructed with a policy and keeps it for its lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BookingPolicy {
    /// Per-night fee for each guest above the second.
    pub extra_guest_fee: Money,
    /// Surcharge rate on the base rate for Friday and Saturday nights.
    pub weekend_surcharge: f64,
    /// Whole-stay discount rate at 7 or more nights.
    pub long_stay_discount_7: f64,
    /// Whole-stay discount rate at 14 or more nights (applied instead of
    /// the 7-night rate, not on top of it).
    pub long_stay_discount_14: f64,
    /// Days before check-in at or beyond which a cancellation refunds in
    /// full.
    pub full_refund_days: i64,
    /// Days before check-in at or beyond which a cancellation refunds half.
    pub half_refund_days: i64,
}

impl BookingPolicy {
    /// The standard policy in the given currency.
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            extra_guest_fee: Money::from_decimal(25.0, currency),
            weekend_surcharge: 0.20,
            long_stay_discount_7: 0.10,
            long_stay_discount_14: 0.15,
            full_refund_days: 7,
            half_refund_days: 3,
        }
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self::for_currency(Currency::USD)
    }
}

/// In-memory hotel reservation system.
///
/// Holds the room inventory and all bookings, including cancelled ones:
/// cancellation flags a booking rather than deleting it, and flagged
/// bookings are excluded from availability checks and queries.
#[derive(Debug, Clone)]
pub struct BookingSystem {
    rooms: BTreeMap<u32, Room>,
    bookings: Vec<Booking>,
    policy: BookingPolicy,
    currency: Currency,
}

impl BookingSystem {
    /// Create an empty system with the standard policy in the given
    /// currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            rooms: BTreeMap::new(),
            bookings: Vec::new(),
            policy: BookingPolicy::for_currency(currency),
            currency,
        }
    }

    /// Create an empty system with an explicit policy.
    ///
    /// The policy's fee must be in the system currency.
    pub fn with_policy(currency: Currency, policy: BookingPolicy) -> Result<Self, StorefrontError> {
        if policy.extra_guest_fee.currency != currency {
            return Err(StorefrontError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: policy.extra_guest_fee.currency.code().to_string(),
            });
        }
        Ok(Self {
            rooms: BTreeMap::new(),
            bookings: Vec::new(),
            policy,
            currency,
        })
    }

    /// Register a room. A duplicate room number replaces the existing
    /// record.
    pub fn add_room(&mut self, number: u32, room_type: RoomType) {
        if self.rooms.insert(number, Room::new(number, room_type)).is_some() {
            warn!(room = number, "replaced existing room record");
        }
    }

    /// Number of registered rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Book a room for a guest over `[check_in, check_out)`.
    ///
    /// The room must exist and fit the guest count
    /// ([`StorefrontError::InvalidBooking`]), and the dates must not
    /// overlap a live booking for the same room
    /// ([`StorefrontError::RoomNotAvailable`]). Nothing is stored on
    /// failure.
    pub fn book_room(
        &mut self,
        guest_name: impl Into<String>,
        room_number: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
        num_guests: u32,
    ) -> Result<BookingRef, StorefrontError> {
        let room = self.rooms.get(&room_number).ok_or_else(|| {
            StorefrontError::InvalidBooking(format!("room {room_number} does not exist"))
        })?;
        let capacity = room.room_type.capacity();
        if num_guests > capacity {
            return Err(StorefrontError::InvalidBooking(format!(
                "room {room_number} has capacity {capacity}, cannot book for {num_guests} guests"
            )));
        }

        let booking = Booking::new(guest_name, room_number, check_in, check_out, num_guests)?;

        if !self.is_room_available(room_number, check_in, check_out) {
            return Err(StorefrontError::RoomNotAvailable {
                room: room_number,
                check_in,
                check_out,
            });
        }

        let reference = booking.reference.clone();
        debug!(
            reference = %reference,
            room = room_number,
            %check_in,
            %check_out,
            "booked room"
        );
        self.bookings.push(booking);
        Ok(reference)
    }

    /// Check whether a room is free over `[check_in, check_out)`.
    ///
    /// Cancelled bookings never block availability. Same-day
    /// checkout/check-in is not a conflict.
    pub fn is_room_available(
        &self,
        room_number: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> bool {
        !self.bookings.iter().any(|b| {
            b.room_number == room_number && !b.cancelled && b.overlaps(check_in, check_out)
        })
    }

    /// Look up a booking by reference.
    pub fn booking(&self, reference: &BookingRef) -> Result<&Booking, StorefrontError> {
        self.bookings
            .iter()
            .find(|b| &b.reference == reference)
            .ok_or_else(|| {
                StorefrontError::InvalidBooking(format!("booking {reference} not found"))
            })
    }

    /// Cancel a booking.
    ///
    /// Sets the cancelled flag and retains the record; the dates become
    /// available again. Cancelling an unknown or already-cancelled booking
    /// fails with [`StorefrontError::InvalidBooking`].
    pub fn cancel_booking(&mut self, reference: &BookingRef) -> Result<(), StorefrontError> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| &b.reference == reference)
            .ok_or_else(|| {
                StorefrontError::InvalidBooking(format!("booking {reference} not found"))
            })?;
        if booking.cancelled {
            return Err(StorefrontError::InvalidBooking(format!(
                "booking {reference} is already cancelled"
            )));
        }
        booking.cancelled = true;
        debug!(reference = %reference, "cancelled booking");
        Ok(())
    }

    /// Move a booking to new dates.
    ///
    /// The new range is validated and re-checked for conflicts against
    /// every other live booking for the room; the booking being moved does
    /// not conflict with itself.
    pub fn modify_booking_dates(
        &mut self,
        reference: &BookingRef,
        new_check_in: NaiveDate,
        new_check_out: NaiveDate,
    ) -> Result<(), StorefrontError> {
        let idx = self
            .bookings
            .iter()
            .position(|b| &b.reference == reference)
            .ok_or_else(|| {
                StorefrontError::InvalidBooking(format!("booking {reference} not found"))
            })?;
        if self.bookings[idx].cancelled {
            return Err(StorefrontError::InvalidBooking(
                "cannot modify a cancelled booking".to_string(),
            ));
        }
        if new_check_out <= new_check_in {
            return Err(StorefrontError::InvalidBooking(
                "check-out date must be after check-in date".to_string(),
            ));
        }

        let room_number = self.bookings[idx].room_number;
        let conflict = self.bookings.iter().enumerate().any(|(i, b)| {
            i != idx
                && b.room_number == room_number
                && !b.cancelled
                && b.overlaps(new_check_in, new_check_out)
        });
        if conflict {
            return Err(StorefrontError::RoomNotAvailable {
                room: room_number,
                check_in: new_check_in,
                check_out: new_check_out,
            });
        }

        let booking = &mut self.bookings[idx];
        booking.check_in = new_check_in;
        booking.check_out = new_check_out;
        debug!(
            reference = %reference,
            check_in = %new_check_in,
            check_out = %new_check_out,
            "moved booking"
        );
        Ok(())
    }

    /// Total cost of a stay.
    ///
    /// Base rate per night, plus the extra-guest fee per night for each
    /// guest above the second, plus the weekend surcharge for each Friday
    /// or Saturday night, minus the long-stay discount (the 14-night rate
    /// replaces the 7-night rate rather than stacking).
    pub fn total_cost(&self, reference: &BookingRef) -> Result<Money, StorefrontError> {
        let booking = self.booking(reference)?;
        let room = self.rooms.get(&booking.room_number).ok_or_else(|| {
            StorefrontError::InvalidBooking(format!(
                "room {} does not exist",
                booking.room_number
            ))
        })?;

        let rate = room.room_type.base_rate(self.currency);
        let nights = booking.nights();
        let mut total = rate.try_multiply(nights).ok_or(StorefrontError::Overflow)?;

        if booking.num_guests > 2 {
            let extra = (booking.num_guests - 2) as i64;
            let fee = self
                .policy
                .extra_guest_fee
                .try_multiply(extra * nights)
                .ok_or(StorefrontError::Overflow)?;
            total = total.try_add(&fee).ok_or(StorefrontError::Overflow)?;
        }

        let weekend_nights = booking
            .check_in
            .iter_days()
            .take_while(|d| *d < booking.check_out)
            .filter(|d| matches!(d.weekday(), Weekday::Fri | Weekday::Sat))
            .count() as i64;
        if weekend_nights > 0 {
            let surcharge = rate
                .try_multiply(weekend_nights)
                .ok_or(StorefrontError::Overflow)?
                .multiply_decimal(self.policy.weekend_surcharge);
            total = total.try_add(&surcharge).ok_or(StorefrontError::Overflow)?;
        }

        if nights >= 14 {
            total = total.multiply_decimal(1.0 - self.policy.long_stay_discount_14);
        } else if nights >= 7 {
            total = total.multiply_decimal(1.0 - self.policy.long_stay_discount_7);
        }

        Ok(total)
    }

    /// Refund due when cancelling on the given date.
    ///
    /// Full refund at or beyond the full-refund window before check-in,
    /// half within the half-refund window, nothing closer than that.
    pub fn refund_amount(
        &self,
        reference: &BookingRef,
        cancellation_date: NaiveDate,
    ) -> Result<Money, StorefrontError> {
        let booking = self.booking(reference)?;
        let days_until = (booking.check_in - cancellation_date).num_days();
        let total = self.total_cost(reference)?;

        if days_until >= self.policy.full_refund_days {
            Ok(total)
        } else if days_until >= self.policy.half_refund_days {
            Ok(total.multiply_decimal(0.5))
        } else {
            Ok(Money::zero(self.currency))
        }
    }

    /// All live bookings held by the given guest.
    pub fn bookings_by_guest(&self, guest_name: &str) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.guest_name == guest_name && !b.cancelled)
            .collect()
    }

    /// All live bookings for the given room.
    pub fn bookings_by_room(&self, room_number: u32) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.room_number == room_number && !b.cancelled)
            .collect()
    }

    /// Live bookings whose check-in is on or after the given date.
    pub fn upcoming_bookings(&self, as_of: NaiveDate) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.check_in >= as_of && !b.cancelled)
            .collect()
    }

    /// Live bookings whose guests are in-house on the given date.
    pub fn active_bookings(&self, as_of: NaiveDate) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.is_active_on(as_of) && !b.cancelled)
            .collect()
    }
}
