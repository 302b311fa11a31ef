//! Shopping cart module.
//!
//! Contains the cart value type and its line items.

mod cart;

pub use cart::{Cart, LineItem};
