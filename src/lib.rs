//! Storefront domain types and pricing logic.
//!
//! This crate provides in-memory building blocks for a small storefront:
//!
//! - **Catalog**: immutable products with case-insensitive name lookup
//! - **Cart**: line items over a shared catalog, with pluggable discount
//!   strategies (percentage, fixed amount, buy-one-get-one-free,
//!   buy-X-get-Y-free)
//! - **Booking**: hotel rooms, overlap-checked reservations, stay costing,
//!   refund policy
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_core::prelude::*;
//! use std::sync::Arc;
//!
//! // Seed a catalog and open a cart over it.
//! let mut catalog = Catalog::new(Currency::USD);
//! catalog.insert("apple", Money::from_decimal(1.0, Currency::USD))?;
//! catalog.insert("banana", Money::from_decimal(0.5, Currency::USD))?;
//!
//! let mut cart = Cart::new(Arc::new(catalog));
//! cart.add("apple", 3)?;
//!
//! // Price it under a strategy.
//! let bogo = BuyOneGetOneFree;
//! let price = cart.final_price(Some(&bogo))?;
//! println!("Final: {}", price.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod booking;
pub mod cart;
pub mod catalog;

pub use error::StorefrontError;
pub use ids::{BookingRef, ProductName};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StorefrontError;
    pub use crate::ids::{BookingRef, ProductName};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{
        BuyOneGetOneFree, BuyXGetYFree, Cart, DiscountStrategy, FixedAmountDiscount, LineItem,
        PercentageDiscount,
    };

    // Booking
    pub use crate::booking::{Booking, BookingPolicy, BookingSystem, Room, RoomType};
}
