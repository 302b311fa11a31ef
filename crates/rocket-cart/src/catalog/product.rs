//! Product display data.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Create a new product record.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}
