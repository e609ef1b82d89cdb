//! Cart and line item types.

use crate::cart::DiscountStrategy;
use crate::catalog::{Catalog, Product};
use crate::error::StorefrontError;
use crate::ids::ProductName;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// The product, cloned from the catalog.
    pub product: Product,
    /// Quantity. Always at least 1 while the item is stored.
    pub quantity: u32,
}

impl LineItem {
    /// Total price for this line (unit price * quantity).
    pub fn line_total(&self) -> Money {
        self.product.price().multiply(self.quantity as i64)
    }
}

/// A shopping cart.
///
/// Carts resolve product names against a shared read-only catalog supplied
/// at construction. Each product appears at most once; adding the same name
/// again increments the existing line's quantity.
#[derive(Debug, Clone)]
pub struct Cart {
    catalog: Arc<Catalog>,
    items: BTreeMap<ProductName, LineItem>,
}

impl Cart {
    /// Create an empty cart over the given catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        debug!(currency = %catalog.currency(), "initialized empty cart");
        Self {
            catalog,
            items: BTreeMap::new(),
        }
    }

    /// Add a product to the cart by name, case-insensitively.
    ///
    /// Fails with [`StorefrontError::UnknownProduct`] when the name is not
    /// in the catalog, before any mutation. Adding quantity 0 is a no-op; a
    /// zero-quantity line is never stored.
    pub fn add(&mut self, name: &str, quantity: u32) -> Result<(), StorefrontError> {
        let product = self
            .catalog
            .get(name)
            .ok_or_else(|| StorefrontError::UnknownProduct(name.to_string()))?;

        if quantity == 0 {
            debug!(product = name, "add of quantity 0 ignored");
            return Ok(());
        }

        let key = product.name().clone();
        if let Some(item) = self.items.get_mut(&key) {
            item.quantity = item
                .quantity
                .checked_add(quantity)
                .ok_or(StorefrontError::Overflow)?;
            debug!(product = %key, quantity = item.quantity, "updated line item quantity");
        } else {
            self.items.insert(
                key.clone(),
                LineItem {
                    product: product.clone(),
                    quantity,
                },
            );
            debug!(product = %key, quantity, "added line item");
        }
        Ok(())
    }

    /// Remove a quantity of a product from the cart.
    ///
    /// Decrements the line's quantity; when the result would reach 0 the
    /// line item is deleted entirely. Removing a product that is not in the
    /// cart is a no-op that logs a warning.
    pub fn remove(&mut self, name: &str, quantity: u32) {
        let key = ProductName::new(name);
        match self.items.get_mut(&key) {
            Some(item) if item.quantity > quantity => {
                item.quantity -= quantity;
                debug!(product = %key, quantity = item.quantity, "reduced line item quantity");
            }
            Some(_) => {
                self.items.remove(&key);
                debug!(product = %key, "removed line item");
            }
            None => {
                warn!(product = %key, "attempted to remove a product that is not in the cart");
            }
        }
    }

    /// Sum of `unit price * quantity` over all line items. Pure.
    pub fn total_price(&self) -> Money {
        self.items
            .values()
            .fold(Money::zero(self.currency()), |acc, item| {
                acc + item.line_total()
            })
    }

    /// Sum of quantities across line items.
    pub fn total_items(&self) -> u64 {
        self.items.values().map(|i| i.quantity as u64).sum()
    }

    /// Number of distinct products in the cart.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all line items.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("cleared cart");
    }

    /// Get a line item by product name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.get(&ProductName::new(name))
    }

    /// Iterate over the cart's line items.
    pub fn line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    /// The cart currency (the catalog's).
    pub fn currency(&self) -> Currency {
        self.catalog.currency()
    }

    /// Final price after applying the given discount strategy.
    ///
    /// With no strategy the undiscounted total is returned.
    pub fn final_price(
        &self,
        strategy: Option<&dyn DiscountStrategy>,
    ) -> Result<Money, StorefrontError> {
        let price = match strategy {
            Some(strategy) => strategy.apply_discount(self)?,
            None => self.total_price(),
        };
        debug!(price = %price, "final price after discount");
        Ok(price)
    }

    /// Price with the given discount strategy removed again.
    ///
    /// Best-effort inverse of [`Cart::final_price`]; see the individual
    /// strategies for how far from a true inverse this can be. With no
    /// strategy the undiscounted total is returned.
    pub fn restored_price(
        &self,
        strategy: Option<&dyn DiscountStrategy>,
    ) -> Result<Money, StorefrontError> {
        match strategy {
            Some(strategy) => strategy.remove_discount(self),
            None => Ok(self.total_price()),
        }
    }
}
