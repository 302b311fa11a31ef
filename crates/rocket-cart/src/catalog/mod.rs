//! Catalog records read from the storefront API.
//!
//! Both types are read-only snapshots: the cart never writes them back.

mod inventory;
mod product;

pub use inventory::Stock;
pub use product::Product;
