//! HTTP API module for the leaderboard, health, and metrics endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{
    fetch_leaderboard, AppState, ErrorPayload, LeaderboardOutcome,
};
pub use routes::{create_router, LEADERBOARD_PATH};
