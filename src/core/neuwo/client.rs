use anyhow::{Error, anyhow, bail};
use reqwest::{Client, redirect, retry};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Transport settings for the classification api calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(1)
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Issues classification GETs. Holds one pooled http client shared
/// across every auction cycle.
pub struct ClassificationClient {
    client: Client,
}

impl ClassificationClient {
    /// Eagerly builds the underlying http client so a bad setup
    /// fails on startup instead of on the first auction
    pub fn new(config: &HttpClientConfig) -> Result<Self, Error> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .tcp_keepalive(Some(Duration::from_secs(20)))
            .retry(retry::never())
            .redirect(redirect::Policy::limited(3))
            .tcp_nodelay(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| anyhow!("Failed to build classification http client: {}", e))?;

        Ok(ClassificationClient { client })
    }

    /// Fetches the classification body for a fully built request url
    ///
    /// # Behavior
    /// Connection failures, timeouts, non 2xx statuses and unreadable
    /// bodies are all returned as errors. The body is not parsed here.
    pub async fn fetch(&self, url: &str) -> Result<String, Error> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to execute classification request: {}", e))?;

        let status = res.status();
        if !status.is_success() {
            bail!(
                "Classification request failed with http {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("no status message")
            );
        }

        debug!("Http {} - awaiting body", status.as_u16());

        res.text()
            .await
            .map_err(|e| anyhow!("Failed to read classification response: {}", e))
    }
}
