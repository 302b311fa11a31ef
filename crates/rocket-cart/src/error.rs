//! Cart error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur inside cart operations.
///
/// None of these reach callers of [`CartStore`](crate::CartStore): each
/// operation turns its error into a [`Notice`](crate::Notice).
#[derive(Error, Debug)]
pub enum CartError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No stock record for the product.
    #[error("Stock not found for product {0}")]
    StockNotFound(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Requested amount exceeds available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Amount below one.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// A remote collaborator failed (network, HTTP status, bad payload).
    #[error("Service error: {0}")]
    Service(String),
}

impl CartError {
    /// Whether this is a stock-policy rejection rather than a failure.
    pub fn is_stock_rejection(&self) -> bool {
        matches!(self, CartError::InsufficientStock { .. })
    }
}
