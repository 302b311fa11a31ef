//! JSON fetch client over `reqwest`.

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

/// HTTP client bound to the storefront API base URL.
///
/// Every request gets the policy's timeouts; transient failures are retried
/// per its retry policy. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: Url,
    client: reqwest::Client,
    policy: FetchPolicy,
}

impl FetchClient {
    /// Create a client for `base_url` (e.g. `http://localhost:3333`).
    pub fn new(base_url: &str, policy: FetchPolicy) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total)
            .user_agent(concat!("rocket-cart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            policy,
        })
    }

    /// Resolve `path` against the base URL, keeping any base path prefix.
    pub fn url(&self, path: &str) -> Result<Url, FetchError> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| FetchError::InvalidUrl(format!("{joined}: {e}")))
    }

    /// GET `path` and decode the JSON body, retrying transient failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url(path)?;
        let mut attempt = 0;

        loop {
            match self.get_once(&url).await {
                Ok(value) => {
                    debug!(url = %url, attempt, "fetch succeeded");
                    return Ok(value);
                }
                Err(e) if self.policy.retry.should_retry(&e, attempt) => {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                    warn!(url = %url, attempt, error = %e, delay_ms, "retrying fetch");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url.as_str()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, url.as_str()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::serve;
    use super::*;
    use crate::retry::BackoffStrategy;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: u64,
        amount: i64,
    }

    fn fast_policy(max_retries: u32) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::default(),
            RetryPolicy::new(max_retries).with_backoff(BackoffStrategy::None),
        )
    }

    #[test]
    fn test_url_joining() {
        let client = FetchClient::new("http://localhost:3333/api/", fast_policy(0)).unwrap();
        assert_eq!(
            client.url("/stock/7").unwrap().as_str(),
            "http://localhost:3333/api/stock/7"
        );

        let client = FetchClient::new("http://localhost:3333", fast_policy(0)).unwrap();
        assert_eq!(
            client.url("products/1").unwrap().as_str(),
            "http://localhost:3333/products/1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            FetchClient::new("not a url", fast_policy(0)),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_get_json() {
        let (base, requests) = serve(vec![(200, r#"{"id":7,"amount":3}"#)]).await;
        let client = FetchClient::new(&base, fast_policy(0)).unwrap();

        let record: Record = client.get_json("/stock/7").await.unwrap();
        assert_eq!(record, Record { id: 7, amount: 3 });
        assert_eq!(requests.lock().unwrap()[0], "GET /stock/7 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let (base, requests) = serve(vec![(404, "{}")]).await;
        let client = FetchClient::new(&base, fast_policy(3)).unwrap();

        let result: Result<Record, _> = client.get_json("/stock/9").await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_retried_then_succeeds() {
        let (base, requests) = serve(vec![
            (503, "{}"),
            (500, "{}"),
            (200, r#"{"id":1,"amount":5}"#),
        ])
        .await;
        let client = FetchClient::new(&base, fast_policy(2)).unwrap();

        let record: Record = client.get_json("/stock/1").await.unwrap();
        assert_eq!(record.amount, 5);
        assert_eq!(requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_server_error_exhausts_retries() {
        let (base, _requests) = serve(vec![(500, "{}"), (500, "{}")]).await;
        let client = FetchClient::new(&base, fast_policy(1)).unwrap();

        let result: Result<Record, _> = client.get_json("/stock/1").await;
        assert!(matches!(result, Err(FetchError::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_bad_payload() {
        let (base, _requests) = serve(vec![(200, r#"{"unexpected":true}"#)]).await;
        let client = FetchClient::new(&base, fast_policy(2)).unwrap();

        let result: Result<Record, _> = client.get_json("/stock/1").await;
        assert!(matches!(result, Err(FetchError::Deserialization(_))));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = FetchClient::new(&format!("http://{addr}"), fast_policy(0)).unwrap();
        let result: Result<Record, _> = client.get_json("/stock/1").await;
        assert!(matches!(result, Err(FetchError::Connection(_))));
    }
}
