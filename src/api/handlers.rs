//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::Value;
use strum::{Display, IntoStaticStr};
use tracing::{error, info, instrument};
use url::Url;

use crate::config::Config;
use crate::error::{HandlerError, ProxyError};
use crate::leaderboard::{leaderboard_url, Clock, DateWindow, LeaderboardSource, SystemClock};
use crate::metrics;

/// Application state shared with handlers.
///
/// This is the per-request invocation context: configuration, the
/// upstream source and the clock.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    upstream_url: Arc<Url>,
    source: Arc<dyn LeaderboardSource>,
    clock: Arc<dyn Clock>,
    prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state using the system clock.
    pub fn new(
        config: Config,
        source: impl LeaderboardSource + 'static,
    ) -> Result<Self, ProxyError> {
        let upstream_url = Url::parse(&config.thrill_api_url)?;

        Ok(Self {
            config: Arc::new(config),
            upstream_url: Arc::new(upstream_url),
            source: Arc::new(source),
            clock: Arc::new(SystemClock),
            prometheus: None,
        })
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Terminal outcome of one leaderboard request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LeaderboardOutcome {
    /// No token configured, upstream not called.
    MissingToken,
    /// Upstream call failed.
    UpstreamError,
    /// Upstream payload forwarded.
    Success,
}

impl LeaderboardOutcome {
    /// Classify a request result.
    pub fn of<T>(result: &Result<T, HandlerError>) -> Self {
        match result {
            Ok(_) => LeaderboardOutcome::Success,
            Err(HandlerError::MissingToken) => LeaderboardOutcome::MissingToken,
            Err(_) => LeaderboardOutcome::UpstreamError,
        }
    }

    /// Metric label.
    pub fn as_label(self) -> &'static str {
        self.into()
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    /// Fixed, caller-facing message.
    pub error: String,
    /// Underlying failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let payload = ErrorPayload {
            error: self.to_string(),
            details: self.details(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Compute the current window and fetch its leaderboard.
///
/// The token check happens after the URL is built and before any network
/// activity.
#[instrument(skip_all)]
pub async fn fetch_leaderboard(state: &AppState) -> Result<Value, HandlerError> {
    let window = DateWindow::containing(state.clock.today())?;
    let url = leaderboard_url(&state.upstream_url, &window)?;
    let token = state.config.api_token();

    info!(url = %url, "Fetching leaderboard");
    info!(token_present = token.is_some(), "Checked API token");

    let Some(token) = token else {
        error!("API token is missing from environment variables");
        return Err(HandlerError::MissingToken);
    };

    let data = state.source.fetch(&url, token).await?;
    info!(window = %window, "Successfully fetched leaderboard data");

    Ok(data)
}

/// Leaderboard handler - forwards the upstream JSON or a 500 error body.
///
/// Method, query string and body of the inbound request are ignored.
pub async fn get_leaderboard_data(State(state): State<AppState>) -> Response {
    let result = fetch_leaderboard(&state).await;
    let outcome = LeaderboardOutcome::of(&result);
    metrics::inc_leaderboard_requests(outcome);

    match result {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            error!(
                outcome = %outcome,
                error = %e,
                details = e.details().as_deref().unwrap_or(""),
                "Leaderboard request failed"
            );
            e.into_response()
        }
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus scrape handler - 404 when no recorder is installed.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
