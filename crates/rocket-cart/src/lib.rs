//! Shopping cart state for the RocketShoes storefront.
//!
//! This crate provides:
//!
//! - **Catalog**: `Product` display data and `Stock` levels
//! - **Cart**: the `Cart` value and its `LineItem`s
//! - **Store**: `CartStore`, the session's cart with stock-checked mutations
//!   and a persisted snapshot
//! - **Collaborators**: `StockLookup`, `ProductCatalog` and `Notifier` traits
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cart::{CartStore, ProductId};
//! use rocket_cache::MemoryStore;
//!
//! let api = Arc::new(StorefrontApi::new(client));
//! let store = CartStore::restore(MemoryStore::new(), api.clone(), api, LogNotifier);
//!
//! store.add_product(ProductId::new(7)).await;
//! store.update_product_amount(ProductId::new(7), 2).await;
//!
//! for item in &store.cart() {
//!     println!("{} x{}", item.title, item.amount);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod notify;
pub mod services;
pub mod store;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, LineItem};
pub use catalog::{Product, Stock};
pub use error::CartError;
pub use ids::ProductId;
pub use notify::{Notice, Notifier, RecordingNotifier};
pub use services::{ProductCatalog, StockLookup};
pub use store::{cart_storage_key, CartStore, STORAGE_NAMESPACE};
