//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use rocket_data::{BackoffStrategy, FetchPolicy, RetryPolicy, TimeoutConfig};
use rocket_observability::{LogFormat, LogLevel, LoggingConfig};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cart persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// The `[logging]` section.
///
/// Same shape as [`LoggingConfig`], but `level` defaults to `warn`:
/// rejections already reach the user as notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Minimum level; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingSection {
    /// Subscriber configuration for this section.
    pub fn to_config(self) -> LoggingConfig {
        LoggingConfig::default()
            .with_level(self.level)
            .with_format(self.format)
    }
}

/// Storefront API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the storefront API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First retry delay in milliseconds, doubling per retry; 0 retries at once.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    2_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl ApiConfig {
    /// Fetch policy for the storefront client.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::new(
                Duration::from_millis(self.connect_timeout_ms),
                Duration::from_millis(self.timeout_ms),
            ),
            RetryPolicy::new(self.max_retries).with_backoff(self.backoff()),
        )
    }

    fn backoff(&self) -> BackoffStrategy {
        if self.retry_backoff_ms == 0 {
            return BackoffStrategy::None;
        }
        let base = Duration::from_millis(self.retry_backoff_ms);
        BackoffStrategy::Exponential {
            base,
            max: base.saturating_mul(10),
        }
    }
}

/// Cart persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file, relative to the working directory unless absolute.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".rocket/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Generate a default rocket.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# RocketShoes cart configuration

[api]
base_url = "{base_url}"
timeout_ms = {timeout_ms}
connect_timeout_ms = {connect_timeout_ms}
max_retries = {max_retries}
retry_backoff_ms = {retry_backoff_ms}

[storage]
path = "{path}"

[logging]
# trace, debug, info, warn or error; RUST_LOG overrides
level = "warn"
# human or json
format = "human"
"#,
        base_url = default_base_url(),
        timeout_ms = default_timeout_ms(),
        connect_timeout_ms = default_connect_timeout_ms(),
        max_retries = default_max_retries(),
        retry_backoff_ms = default_retry_backoff_ms(),
        path = default_storage_path(),
    )
}
