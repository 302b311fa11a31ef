//! Storefront API access with timeouts and retries.
//!
//! This crate provides:
//! - `FetchClient` - JSON GET client with automatic timeout/retry
//! - `FetchPolicy` - `TimeoutConfig` plus `RetryPolicy`
//! - `StorefrontApi` - stock and catalog lookups for the cart over HTTP

mod api;
mod client;
mod error;
mod retry;
mod timeout;

pub use api::*;
pub use client::*;
pub use error::*;
pub use retry::*;
pub use timeout::*;
