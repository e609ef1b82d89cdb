//! Discount strategies.
//!
//! A [`DiscountStrategy`] is an interchangeable pricing-adjustment
//! algorithm applied to a cart's total. Strategies are constructed with
//! fixed parameters and reused across many carts; they never own the cart
//! they price.
//!
//! `remove_discount` is a best-effort inverse only: the percentage and
//! fixed-amount policies re-derive from the cart's *current* total rather
//! than a stored pre-discount total, so applying and then removing against
//! the same cart does not round-trip through the discounted figure.

use crate::cart::Cart;
use crate::error::StorefrontError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Item-count threshold above which a fixed-amount discount fires.
pub const DEFAULT_ITEM_THRESHOLD: u64 = 20;

/// A pricing-adjustment algorithm over a cart.
pub trait DiscountStrategy {
    /// Compute the cart's final price with this discount applied.
    fn apply_discount(&self, cart: &Cart) -> Result<Money, StorefrontError>;

    /// Compute the cart's price with this discount removed again.
    fn remove_discount(&self, cart: &Cart) -> Result<Money, StorefrontError>;
}

/// Percentage off the cart total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PercentageDiscount {
    percent: f64,
}

impl PercentageDiscount {
    /// Create a percentage discount. The percentage is validated per call,
    /// in the [0, 100] domain.
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }

    fn validate(&self) -> Result<(), StorefrontError> {
        if !(0.0..=100.0).contains(&self.percent) {
            return Err(StorefrontError::InvalidParameter(format!(
                "discount percentage must be between 0 and 100, got {}",
                self.percent
            )));
        }
        Ok(())
    }
}

impl DiscountStrategy for PercentageDiscount {
    fn apply_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        self.validate()?;
        let total = cart.total_price();
        Ok(total.subtract(&total.percentage(self.percent)))
    }

    /// Scales the current total back up by `100 / (100 - percent)`. This is
    /// only an approximate inverse when the total handed in is already the
    /// discounted figure; a 100% discount cannot be inverted at all.
    fn remove_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        self.validate()?;
        if self.percent == 100.0 {
            return Err(StorefrontError::InvalidParameter(
                "a 100% discount cannot be removed from a zeroed total".to_string(),
            ));
        }
        let total = cart.total_price();
        Ok(total.multiply_decimal(100.0 / (100.0 - self.percent)))
    }
}

/// Fixed amount off the cart total, gated on cart size.
///
/// The amount only comes off when the cart holds strictly more items than
/// the threshold and the total strictly exceeds the amount; otherwise the
/// total is returned unmodified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FixedAmountDiscount {
    amount: Money,
    item_threshold: u64,
}

impl FixedAmountDiscount {
    /// Create a fixed-amount discount with the default item threshold.
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            item_threshold: DEFAULT_ITEM_THRESHOLD,
        }
    }

    /// Override the item-count threshold.
    pub fn with_item_threshold(mut self, item_threshold: u64) -> Self {
        self.item_threshold = item_threshold;
        self
    }

    fn validate(&self, total: &Money) -> Result<(), StorefrontError> {
        if self.amount.currency != total.currency {
            return Err(StorefrontError::CurrencyMismatch {
                expected: total.currency.code().to_string(),
                got: self.amount.currency.code().to_string(),
            });
        }
        if self.amount.is_negative() {
            return Err(StorefrontError::InvalidParameter(format!(
                "discount amount must be non-negative, got {}",
                self.amount
            )));
        }
        if total.amount_cents < self.amount.amount_cents {
            return Err(StorefrontError::InvalidParameter(format!(
                "discount amount {} cannot exceed total price {}",
                self.amount, total
            )));
        }
        Ok(())
    }

    fn fires(&self, cart: &Cart, total: &Money) -> bool {
        cart.total_items() > self.item_threshold
            && total.amount_cents > self.amount.amount_cents
    }
}

impl DiscountStrategy for FixedAmountDiscount {
    fn apply_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        let total = cart.total_price();
        self.validate(&total)?;
        if self.fires(cart, &total) {
            debug!(
                amount = %self.amount,
                threshold = self.item_threshold,
                "applying fixed amount discount"
            );
            return Ok(total.subtract(&self.amount));
        }
        Ok(total)
    }

    /// Adds the amount back onto the current total, under the same gate and
    /// validations as `apply_discount`. Not an exact inverse: the gate is
    /// re-evaluated against the current total.
    fn remove_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        let total = cart.total_price();
        self.validate(&total)?;
        if self.fires(cart, &total) {
            debug!(
                amount = %self.amount,
                threshold = self.item_threshold,
                "removing fixed amount discount"
            );
            return Ok(total.add(&self.amount));
        }
        Ok(total)
    }
}

/// Buy one, get one free.
///
/// For each line item, every second unit is free; odd quantities round the
/// free count down.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyOneGetOneFree;

impl DiscountStrategy for BuyOneGetOneFree {
    fn apply_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        let mut total = Money::zero(cart.currency());
        for item in cart.line_items() {
            let free = item.quantity / 2;
            let payable = item.quantity - free;
            total = total.add(&item.product.price().multiply(payable as i64));
        }
        Ok(total)
    }

    fn remove_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        Ok(cart.total_price())
    }
}

/// Buy X, get Y free.
///
/// For each line item, every full group of `x + y` units yields one free
/// unit, matching the buy-one variant at x = y = 1. Partial groups are
/// never free.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyXGetYFree {
    x: u32,
    y: u32,
}

impl BuyXGetYFree {
    /// Create a buy-X-get-Y-free discount. Both counts must be at least 1,
    /// validated per call.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    fn validate(&self) -> Result<(), StorefrontError> {
        if self.x < 1 || self.y < 1 {
            return Err(StorefrontError::InvalidParameter(format!(
                "buy-x-get-y counts must each be at least 1, got x={} y={}",
                self.x, self.y
            )));
        }
        Ok(())
    }
}

impl DiscountStrategy for BuyXGetYFree {
    fn apply_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        self.validate()?;
        let group = self.x + self.y;
        let mut total = Money::zero(cart.currency());
        for item in cart.line_items() {
            let free = item.quantity / group;
            let payable = item.quantity - free;
            total = total.add(&item.product.price().multiply(payable as i64));
        }
        Ok(total)
    }

    fn remove_discount(&self, cart: &Cart) -> Result<Money, StorefrontError> {
        self.validate()?;
        Ok(cart.total_price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::Currency;
    use std::sync::Arc;

    fn fruit_cart() -> Cart {
        let mut catalog = Catalog::new(Currency::USD);
        catalog
            .insert("apple", Money::from_decimal(1.0, Currency::USD))
            .unwrap();
        catalog
            .insert("banana", Money::from_decimal(0.5, Currency::USD))
            .unwrap();
        catalog
            .insert("guava", Money::from_decimal(2.5, Currency::USD))
            .unwrap();
        Cart::new(Arc::new(catalog))
    }

    fn usd(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::USD)
    }

    #[test]
    fn test_percentage_discount() {
        let mut cart = fruit_cart();
        cart.add("apple", 100).unwrap(); // 100.00
        let strategy = PercentageDiscount::new(10.0);
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(90.0));
    }

    #[test]
    fn test_zero_percentage_is_identity() {
        let mut cart = fruit_cart();
        cart.add("apple", 50).unwrap();
        let strategy = PercentageDiscount::new(0.0);
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(50.0));
    }

    #[test]
    fn test_full_percentage_zeroes_total() {
        let mut cart = fruit_cart();
        cart.add("apple", 100).unwrap();
        let strategy = PercentageDiscount::new(100.0);
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(0.0));
    }

    #[test]
    fn test_negative_percentage_rejected() {
        let mut cart = fruit_cart();
        cart.add("apple", 60).unwrap();
        let strategy = PercentageDiscount::new(-10.0);
        assert!(matches!(
            strategy.apply_discount(&cart),
            Err(StorefrontError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_excessive_percentage_rejected() {
        let mut cart = fruit_cart();
        cart.add("apple", 70).unwrap();
        let strategy = PercentageDiscount::new(150.0);
        assert!(matches!(
            strategy.apply_discount(&cart),
            Err(StorefrontError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_percentage_on_empty_cart() {
        let cart = fruit_cart();
        let strategy = PercentageDiscount::new(20.0);
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(0.0));
    }

    #[test]
    fn test_percentage_remove_rescales_current_total() {
        // The cart total is treated as the discounted figure and scaled
        // back up; against an undiscounted cart this overshoots. That
        // asymmetry is the contract.
        let mut cart = fruit_cart();
        cart.add("apple", 90).unwrap(); // 90.00
        let strategy = PercentageDiscount::new(10.0);
        assert_eq!(strategy.remove_discount(&cart).unwrap(), usd(100.0));
    }

    #[test]
    fn test_full_percentage_cannot_be_removed() {
        let mut cart = fruit_cart();
        cart.add("apple", 10).unwrap();
        let strategy = PercentageDiscount::new(100.0);
        assert!(matches!(
            strategy.remove_discount(&cart),
            Err(StorefrontError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_fixed_amount_discount_applies_above_threshold() {
        let mut cart = fruit_cart();
        cart.add("apple", 100).unwrap(); // 100 items, 100.00
        let strategy = FixedAmountDiscount::new(usd(20.0));
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(80.0));
    }

    #[test]
    fn test_fixed_amount_discount_inert_below_threshold() {
        let mut cart = fruit_cart();
        cart.add("apple", 10).unwrap(); // 10 items, 10.00
        let strategy = FixedAmountDiscount::new(usd(5.0));
        // Amount fits the total but the cart is too small; no discount.
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(10.0));
    }

    #[test]
    fn test_fixed_amount_exceeding_total_rejected() {
        let mut cart = fruit_cart();
        cart.add("apple", 10).unwrap(); // 10.00
        let strategy = FixedAmountDiscount::new(usd(20.0));
        assert!(matches!(
            strategy.apply_discount(&cart),
            Err(StorefrontError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_negative_fixed_amount_rejected() {
        let mut cart = fruit_cart();
        cart.add("apple", 50).unwrap();
        let strategy = FixedAmountDiscount::new(usd(-10.0));
        assert!(matches!(
            strategy.apply_discount(&cart),
            Err(StorefrontError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_fixed_amount_custom_threshold() {
        let mut cart = fruit_cart();
        cart.add("apple", 10).unwrap(); // 10.00
        let strategy = FixedAmountDiscount::new(usd(5.0)).with_item_threshold(5);
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(5.0));
    }

    #[test]
    fn test_fixed_amount_remove_adds_back() {
        let mut cart = fruit_cart();
        cart.add("apple", 100).unwrap(); // 100.00
        let strategy = FixedAmountDiscount::new(usd(20.0));
        assert_eq!(strategy.remove_discount(&cart).unwrap(), usd(120.0));
    }

    #[test]
    fn test_fixed_amount_remove_inert_below_threshold() {
        let mut cart = fruit_cart();
        cart.add("apple", 10).unwrap();
        let strategy = FixedAmountDiscount::new(usd(5.0));
        assert_eq!(strategy.remove_discount(&cart).unwrap(), usd(10.0));
    }

    #[test]
    fn test_bogo_discount() {
        let mut cart = fruit_cart();
        cart.add("apple", 3).unwrap();
        let strategy = BuyOneGetOneFree;
        // Pay for 2 apples, get 1 free.
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(2.0));
    }

    #[test]
    fn test_bogo_with_odd_quantity() {
        let mut cart = fruit_cart();
        cart.add("banana", 5).unwrap(); // 5 * 0.50
        let strategy = BuyOneGetOneFree;
        // Pay for 3 bananas, get 2 free.
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(1.5));
    }

    #[test]
    fn test_bogo_with_multiple_products() {
        let mut cart = fruit_cart();
        cart.add("apple", 2).unwrap();
        cart.add("banana", 3).unwrap();
        cart.add("guava", 13).unwrap();
        let strategy = BuyOneGetOneFree;
        // Pay for 1 apple + 2 bananas + 7 guavas.
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(19.5));
    }

    #[test]
    fn test_bogo_on_empty_cart() {
        let cart = fruit_cart();
        let strategy = BuyOneGetOneFree;
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(0.0));
    }

    #[test]
    fn test_bogo_remove_restores_full_total() {
        let mut cart = fruit_cart();
        cart.add("apple", 4).unwrap();
        let strategy = BuyOneGetOneFree;
        assert_eq!(strategy.remove_discount(&cart).unwrap(), usd(4.0));
    }

    #[test]
    fn test_buy_x_get_y_matches_bogo_at_one_one() {
        let mut cart = fruit_cart();
        cart.add("apple", 3).unwrap();
        let strategy = BuyXGetYFree::new(1, 1);
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(2.0));
    }

    #[test]
    fn test_buy_two_get_one() {
        let mut cart = fruit_cart();
        cart.add("apple", 17).unwrap();
        let strategy = BuyXGetYFree::new(2, 1);
        // free = 17 / 3 = 5, payable = 12.
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(12.0));
    }

    #[test]
    fn test_buy_x_get_y_partial_group_not_free() {
        let mut cart = fruit_cart();
        cart.add("banana", 5).unwrap(); // one full group of 3, remainder 2
        let strategy = BuyXGetYFree::new(2, 1);
        assert_eq!(strategy.apply_discount(&cart).unwrap(), usd(2.0));
    }

    #[test]
    fn test_buy_x_get_y_zero_counts_rejected() {
        let mut cart = fruit_cart();
        cart.add("apple", 3).unwrap();
        let strategy = BuyXGetYFree::new(0, 1);
        assert!(matches!(
            strategy.apply_discount(&cart),
            Err(StorefrontError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_buy_x_get_y_remove_restores_full_total() {
        let mut cart = fruit_cart();
        cart.add("guava", 6).unwrap();
        let strategy = BuyXGetYFree::new(2, 1);
        assert_eq!(strategy.remove_discount(&cart).unwrap(), usd(15.0));
    }
}
