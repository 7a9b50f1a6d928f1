//! HTTP API route definitions.

use axum::{
    http::Method,
    routing::{any, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{get_leaderboard_data, health, prometheus_metrics, AppState};

/// Path of the leaderboard endpoint, as served to the site.
pub const LEADERBOARD_PATH: &str = "/getLeaderboardData";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        // Leaderboard proxy, any method
        .route(LEADERBOARD_PATH, any(get_leaderboard_data))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
}
