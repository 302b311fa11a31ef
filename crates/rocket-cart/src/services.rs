//! Read-only collaborators the store consults before mutating.

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{Product, Stock};
use crate::error::CartError;
use crate::ids::ProductId;

/// Looks up the current sellable quantity of a product.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Fetch the stock record for `id`.
    async fn stock(&self, id: ProductId) -> Result<Stock, CartError>;
}

/// Looks up product display data.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch the product record for `id`.
    async fn product(&self, id: ProductId) -> Result<Product, CartError>;
}

#[async_trait]
impl<T: StockLookup + ?Sized> StockLookup for Arc<T> {
    async fn stock(&self, id: ProductId) -> Result<Stock, CartError> {
        (**self).stock(id).await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn product(&self, id: ProductId) -> Result<Product, CartError> {
        (**self).product(id).await
    }
}
