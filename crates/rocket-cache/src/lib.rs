//! Key-value persistence slot for RocketCart.
//!
//! The cart is persisted as a single string blob under a namespaced key, the
//! way a browser keeps it in local storage. This crate provides:
//!
//! - [`KeyValueStore`]: the get/set string store the cart writes through
//! - [`MemoryStore`]: process-local store, shareable between instances
//! - [`FileStore`]: JSON-file store that survives restarts
//! - [`Cache`]: typed wrapper with automatic JSON serialization
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::{storage_key, Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = storage_key!("@RocketShoes", "cart");
//!
//! cache.set(&key, &vec![1, 2, 3]).unwrap();
//! let items: Option<Vec<u32>> = cache.get(&key).unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;
