//! Unified error types for the leaderboard proxy.

use thiserror::Error;

/// Unified error type for the proxy process.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Date window could not be built.
    #[error("window error: {0}")]
    Window(#[from] WindowError),

    /// Upstream endpoint is not a valid URL.
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors building or formatting a bi-weekly date window.
#[derive(Error, Debug)]
pub enum WindowError {
    /// A window bound falls outside the supported calendar range.
    #[error("date out of range: {0}")]
    OutOfRange(#[from] time::error::ComponentRange),

    /// A window bound could not be rendered as `YYYY-MM-DD`.
    #[error("failed to format date: {0}")]
    Format(#[from] time::error::Format),

    /// Input was not a `YYYY-MM-DD` date.
    #[error("failed to parse date: {0}")]
    Parse(#[from] time::error::Parse),
}

/// Failures of the upstream leaderboard call.
///
/// The `Display` output is what callers see in the `details` field of the
/// error body, so variants carrying a message print it unprefixed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The API answered with a non-2xx status.
    #[error("API server returned an error: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics only.
        body: String,
    },

    /// Request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("{0}")]
    Decode(String),
}

/// Terminal failures of a leaderboard request.
///
/// `Display` is the `error` field of the response body.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// No API token configured. Detected before any network activity.
    #[error("API token is missing. Check Cloudflare environment variables.")]
    MissingToken,

    /// The window or URL for the upstream call could not be built.
    #[error("Failed to fetch data from the Thrill API.")]
    Window(#[from] WindowError),

    /// The upstream call failed.
    #[error("Failed to fetch data from the Thrill API.")]
    Upstream(#[from] UpstreamError),
}

impl HandlerError {
    /// Underlying failure message, reported as `details`.
    pub fn details(&self) -> Option<String> {
        match self {
            HandlerError::MissingToken => None,
            HandlerError::Window(e) => Some(e.to_string()),
            HandlerError::Upstream(e) => Some(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Decode(err.to_string())
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ProxyError>;
