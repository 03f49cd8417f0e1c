//! Test configuration helpers for loading .env credentials

use publit_production::{ApiClient, Auth, Config};

/// Error type for test configuration
#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Load live API configuration from environment variables
///
/// Required environment variables:
/// - `PUBLIT_USER` - Account user name
/// - `PUBLIT_PASSWORD` - Account password
///
/// Optional environment variables:
/// - `PUBLIT_BASE_URL` - API base URL (default: https://api.publit.com)
/// - `PUBLIT_WORKERS` - Batch worker count (default: 5)
pub fn load_live_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    let user = std::env::var("PUBLIT_USER")
        .map_err(|_| ConfigError("PUBLIT_USER not set in environment".to_string()))?;
    let password = std::env::var("PUBLIT_PASSWORD")
        .map_err(|_| ConfigError("PUBLIT_PASSWORD not set in environment".to_string()))?;

    let mut config = Config {
        auth: Auth::Basic { user, password },
        ..Default::default()
    };
    if let Ok(base_url) = std::env::var("PUBLIT_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(workers) = std::env::var("PUBLIT_WORKERS")
        .ok()
        .and_then(|w| w.parse().ok())
    {
        config.batch.workers = workers;
    }
    Ok(config)
}

/// Whether live credentials are available
pub fn has_live_credentials() -> bool {
    load_live_config().is_ok()
}

/// Client for the live API
pub fn create_live_client() -> Result<ApiClient, ConfigError> {
    let config = load_live_config()?;
    ApiClient::new(config).map_err(|e| ConfigError(e.to_string()))
}
