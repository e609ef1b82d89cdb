//! Shopping cart module.
//!
//! Contains the cart, its line items, and the family of interchangeable
//! discount strategies.

mod cart;
mod discount;

pub use cart::{Cart, LineItem};
pub use discount::{
    BuyOneGetOneFree, BuyXGetYFree, DiscountStrategy, FixedAmountDiscount, PercentageDiscount,
    DEFAULT_ITEM_THRESHOLD,
};
