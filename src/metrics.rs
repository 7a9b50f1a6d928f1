//! Prometheus metrics for request outcomes and upstream latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::api::LeaderboardOutcome;

// === Metric Name Constants ===

/// Leaderboard requests counter metric name, labelled by outcome.
pub const METRIC_LEADERBOARD_REQUESTS: &str = "leaderboard_requests_total";
/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_REQUEST_LATENCY: &str = "upstream_request_latency_ms";

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_LEADERBOARD_REQUESTS,
        "Total number of leaderboard requests by outcome"
    );
    describe_histogram!(
        METRIC_UPSTREAM_REQUEST_LATENCY,
        "Thrill API request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and describe metrics.
///
/// Can only succeed once per process.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment the leaderboard request counter for `outcome`.
pub fn inc_leaderboard_requests(outcome: LeaderboardOutcome) {
    counter!(METRIC_LEADERBOARD_REQUESTS, "outcome" => outcome.as_label()).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for an upstream request.
pub fn timer_upstream_request() -> LatencyTimer {
    LatencyTimer::new(METRIC_UPSTREAM_REQUEST_LATENCY)
}
