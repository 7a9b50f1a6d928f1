//! Application configuration loaded from environment variables.

use std::fmt;

use serde::Deserialize;
use url::Url;

/// Default Thrill referral leaderboard endpoint.
pub const DEFAULT_THRILL_API_URL: &str =
    "https://api.thrill.com/referral/v1/referral-links/streamers";

/// Application configuration loaded from environment variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    // === Thrill API ===
    /// Session token sent as `Cookie: token=<value>`.
    ///
    /// Optional at load time: a missing token is reported per request.
    #[serde(default)]
    pub thrill_api_token: Option<String>,

    /// Leaderboard endpoint, without query string.
    #[serde(default = "default_thrill_api_url")]
    pub thrill_api_url: String,

    /// Upstream request timeout. Unset means no client-side timeout.
    #[serde(default)]
    pub http_timeout_ms: Option<u64>,

    // === Server Configuration ===
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_thrill_api_url() -> String {
    DEFAULT_THRILL_API_URL.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.thrill_api_url)
            .map_err(|e| format!("THRILL_API_URL is not a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err("THRILL_API_URL must use http or https".to_string());
        }

        if self.http_timeout_ms == Some(0) {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// The API token, treating an empty value as absent.
    pub fn api_token(&self) -> Option<&str> {
        self.thrill_api_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Whether a usable API token is configured.
    pub fn has_api_token(&self) -> bool {
        self.api_token().is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thrill_api_token: None,
            thrill_api_url: default_thrill_api_url(),
            http_timeout_ms: None,
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
            log_json: false,
            verbose: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "thrill_api_token",
                &self.thrill_api_token.as_ref().map(|_| "<redacted>"),
            )
            .field("thrill_api_url", &self.thrill_api_url)
            .field("http_timeout_ms", &self.http_timeout_ms)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("log_json", &self.log_json)
            .field("verbose", &self.verbose)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.thrill_api_url, DEFAULT_THRILL_API_URL);
        assert_eq!(config.port, 8080);
        assert_eq!(config.http_timeout_ms, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let config = Config {
            thrill_api_token: Some(String::new()),
            ..Config::default()
        };
        assert!(!config.has_api_token());
        assert_eq!(config.api_token(), None);
    }

    #[test]
    fn token_is_returned_when_set() {
        let config = Config {
            thrill_api_token: Some("abc".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_token(), Some("abc"));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = Config {
            thrill_api_token: Some("super-secret".to_string()),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn validate_rejects_bad_url() {
        let config = Config {
            thrill_api_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            thrill_api_url: "ftp://api.thrill.com/streamers".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_ms: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
