//! Thrill referral API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{UpstreamError, WindowError};
use crate::metrics;

use super::window::DateWindow;

/// Something that can answer a leaderboard query.
#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    /// Fetch the leaderboard at `url`, authenticating with `token`.
    ///
    /// The payload is returned as-is.
    async fn fetch(&self, url: &Url, token: &str) -> Result<Value, UpstreamError>;
}

/// Append the window's `fromDate`/`toDate` parameters to the endpoint.
pub fn leaderboard_url(base: &Url, window: &DateWindow) -> Result<Url, WindowError> {
    let pairs = window.query_pairs()?;
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in &pairs {
            query.append_pair(name, value);
        }
    }
    Ok(url)
}

/// Value of the `Cookie` header carrying the session token.
pub fn token_cookie(token: &str) -> String {
    format!("token={}", token)
}

/// HTTP client for the Thrill referral API.
#[derive(Debug, Clone)]
pub struct ThrillClient {
    http: reqwest::Client,
}

impl ThrillClient {
    /// Create a client with an optional request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Create a client from application config.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(config.http_timeout_ms.map(Duration::from_millis))
    }

    /// Get the HTTP client reference.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[async_trait]
impl LeaderboardSource for ThrillClient {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url, token: &str) -> Result<Value, UpstreamError> {
        let _timer = metrics::timer_upstream_request();

        let response = self
            .http
            .get(url.clone())
            .header(header::COOKIE, token_cookie(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Thrill API returned an error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)?;

        debug!(bytes = body.len(), "Thrill API response decoded");

        Ok(data)
    }
}
