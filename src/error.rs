//! Storefront error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// All variants indicate caller misuse or a business-rule rejection. They
/// are synchronous and non-retryable; no operation mutates state before
/// failing.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Product name is not registered in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// A discount or pricing parameter is outside its valid domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A booking request is malformed.
    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    /// The requested room is already booked for an overlapping date range.
    #[error("Room {room} is not available from {check_in} to {check_out}")]
    RoomNotAvailable {
        room: u32,
        check_in: chrono::NaiveDate,
        check_out: chrono::NaiveDate,
    },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> Self {
        StorefrontError::Serialization(e.to_string())
    }
}
