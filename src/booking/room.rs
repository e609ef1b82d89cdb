//! Room types and rates.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Hotel room category, fixing capacity and nightly base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoomType {
    #[default]
    Standard,
    Deluxe,
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Deluxe => "deluxe",
            RoomType::Suite => "suite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(RoomType::Standard),
            "deluxe" => Some(RoomType::Deluxe),
            "suite" => Some(RoomType::Suite),
            _ => None,
        }
    }

    /// Maximum number of guests.
    pub fn capacity(&self) -> u32 {
        match self {
            RoomType::Standard => 2,
            RoomType::Deluxe => 3,
            RoomType::Suite => 4,
        }
    }

    /// Nightly base rate in the given currency.
    pub fn base_rate(&self, currency: Currency) -> Money {
        let amount = match self {
            RoomType::Standard => 100.0,
            RoomType::Deluxe => 150.0,
            RoomType::Suite => 200.0,
        };
        Money::from_decimal(amount, currency)
    }
}

/// A hotel room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room number, unique within a booking system.
    pub number: u32,
    /// Room category.
    pub room_type: RoomType,
}

impl Room {
    /// Create a new room.
    pub fn new(number: u32, room_type: RoomType) -> Self {
        Self { number, room_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_type_capacity_and_rate() {
        assert_eq!(RoomType::Standard.capacity(), 2);
        assert_eq!(RoomType::Suite.capacity(), 4);
        assert_eq!(
            RoomType::Deluxe.base_rate(Currency::USD),
            Money::new(15000, Currency::USD)
        );
    }

    #[test]
    fn test_room_type_from_str() {
        assert_eq!(RoomType::from_str("Suite"), Some(RoomType::Suite));
        assert_eq!(RoomType::from_str("penthouse"), None);
    }
}
