//! Stock levels.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Current sellable quantity for a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the record belongs to.
    pub id: ProductId,
    /// Quantity available for sale.
    pub amount: i64,
}

impl Stock {
    /// Create a new stock record.
    pub fn new(id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }

    /// Check whether `requested` units can be held in a cart.
    pub fn allows(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}
