//! Read-only product catalog.

use crate::catalog::Product;
use crate::error::StorefrontError;
use crate::ids::ProductName;
use crate::money::{Currency, Money};
use std::collections::BTreeMap;

/// A catalog of products in a single currency.
///
/// The catalog is seeded at construction and read-only afterwards: carts
/// hold a shared handle and only ever look products up. Lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    currency: Currency,
    products: BTreeMap<ProductName, Product>,
}

impl Catalog {
    /// Create an empty catalog in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            products: BTreeMap::new(),
        }
    }

    /// Seed a catalog from a JSON document mapping product names to decimal
    /// prices, e.g. `{"apple": 1.0, "banana": 0.5}`.
    pub fn from_json(json: &str, currency: Currency) -> Result<Self, StorefrontError> {
        let entries: BTreeMap<String, f64> = serde_json::from_str(json)?;
        let mut catalog = Self::new(currency);
        for (name, price) in entries {
            catalog.insert(name, Money::from_decimal(price, currency))?;
        }
        Ok(catalog)
    }

    /// Register a product during seeding.
    ///
    /// The price must be non-negative and in the catalog currency. A name
    /// that is already registered (under any casing) is replaced.
    pub fn insert(
        &mut self,
        name: impl Into<ProductName>,
        price: Money,
    ) -> Result<(), StorefrontError> {
        if price.currency != self.currency {
            return Err(StorefrontError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: price.currency.code().to_string(),
            });
        }
        let product = Product::new(name, price)?;
        self.products.insert(product.name().clone(), product);
        Ok(())
    }

    /// Look up a product by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.get(&ProductName::new(name))
    }

    /// Check whether a product name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The catalog currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Number of registered products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over registered products.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
