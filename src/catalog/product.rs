//! Product value type.

use crate::error::StorefrontError;
use crate::ids::ProductName;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product: a name and a unit price.
///
/// Products are immutable values. They are created once when the catalog is
/// seeded and cloned into cart line items; nothing mutates them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    name: ProductName,
    price: Money,
}

impl Product {
    /// Create a new product.
    ///
    /// The price must be non-negative.
    pub fn new(name: impl Into<ProductName>, price: Money) -> Result<Self, StorefrontError> {
        if price.is_negative() {
            return Err(StorefrontError::InvalidParameter(format!(
                "product price must be non-negative, got {}",
                price
            )));
        }
        Ok(Self {
            name: name.into(),
            price,
        })
    }

    /// The normalized product name.
    pub fn name(&self) -> &ProductName {
        &self.name
    }

    /// The unit price.
    pub fn price(&self) -> Money {
        self.price
    }
}
