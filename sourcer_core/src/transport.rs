use serde::Deserialize;
use std::time::Duration;

use crate::error::SourceError;

/// Fixed descriptive user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Transport tuning for [`timeouting_client`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Bound on the whole round trip, body read included.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Builds the timeout-configured HTTP client the executor runs on.
pub fn timeouting_client(config: &HttpConfig) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        // http/2 can stall on misconfigured gateways; the services speak http/1.1
        .http1_only()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.timeout_secs))
        .pool_max_idle_per_host(2)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| SourceError::Config(format!("failed to build http client: {}", e)))
}
