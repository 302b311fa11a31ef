//! Storefront API endpoints used by the cart.

use async_trait::async_trait;
use rocket_cart::{CartError, Product, ProductCatalog, ProductId, Stock, StockLookup};

use crate::client::FetchClient;
use crate::error::FetchError;

/// Stock and catalog lookups against the storefront REST API.
///
/// - `GET /stock/{id}` → `{ "id": 1, "amount": 3 }`
/// - `GET /products/{id}` → `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: FetchClient,
}

impl StorefrontApi {
    /// Create an API over a configured client.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }
}

fn into_cart_error(e: FetchError, not_found: CartError) -> CartError {
    if e.is_not_found() {
        not_found
    } else {
        e.into()
    }
}

#[async_trait]
impl StockLookup for StorefrontApi {
    async fn stock(&self, id: ProductId) -> Result<Stock, CartError> {
        self.client
            .get_json(&format!("/stock/{id}"))
            .await
            .map_err(|e| into_cart_error(e, CartError::StockNotFound(id)))
    }
}

#[async_trait]
impl ProductCatalog for StorefrontApi {
    async fn product(&self, id: ProductId) -> Result<Product, CartError> {
        self.client
            .get_json(&format!("/products/{id}"))
            .await
            .map_err(|e| into_cart_error(e, CartError::ProductNotFound(id)))
    }
}
