//! Configuration types for publit-production

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client configuration
///
/// Every field has a default, so a config file only needs to set what differs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Publit API, without trailing slash (e.g. "https://api.publit.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Authentication attached to every authenticated call
    #[serde(default)]
    pub auth: Auth,

    /// Request timeout applied to every call, presigned downloads included (default: 60 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Batch operation settings
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: Auth::default(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    /// Create a config for the given base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base URL must not be empty", Some("base_url")));
        }
        url::Url::parse(&self.base_url).map_err(|e| {
            Error::config(format!("base URL is not a valid URL: {}", e), Some("base_url"))
        })?;
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero", Some("timeout")));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub(crate) fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Authentication scheme for the Production API
///
/// Obtaining a token is left to the caller; the client only attaches it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Auth {
    /// No authentication header
    #[default]
    None,
    /// HTTP basic authentication
    Basic {
        /// Account user name
        user: String,
        /// Account password
        password: String,
    },
    /// Bearer token authentication
    Bearer {
        /// API token
        token: String,
    },
}

/// Settings for concurrent batch operations on file lists
///
/// Bound to each [`crate::FileBatch`] when it is created; changing it later only
/// affects batches created afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of concurrent workers per stage (default: 5)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl BatchConfig {
    /// Create a batch config with the given worker count
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.publit.com".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_user_agent() -> String {
    concat!("publit-production/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_workers() -> usize {
    5
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
