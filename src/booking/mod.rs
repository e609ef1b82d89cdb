//! Hotel booking module.
//!
//! Contains rooms, validated bookings, and the reservation system with
//! date-overlap availability checking, stay costing, and refund policy.

mod booking;
mod room;
mod system;

pub use booking::Booking;
pub use room::{Room, RoomType};
pub use system::{BookingPolicy, BookingSystem};
