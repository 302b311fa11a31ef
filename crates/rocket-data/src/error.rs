//! HTTP client error types.

use rocket_cart::CartError;
use thiserror::Error;

/// Errors that can occur when fetching from the storefront API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Non-success HTTP status other than 404.
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    /// The resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Could not connect.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to parse response body.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Any other request failure.
    #[error("Request error: {0}")]
    Request(String),

    /// Invalid base URL or path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(e: reqwest::Error, url: &str) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(url.to_string())
        } else if e.is_connect() {
            FetchError::Connection(format!("{url}: {e}"))
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }

    /// Whether the resource was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

impl From<FetchError> for CartError {
    fn from(e: FetchError) -> Self {
        CartError::Service(e.to_string())
    }
}
