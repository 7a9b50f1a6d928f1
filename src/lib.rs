//! Bi-weekly Thrill referral leaderboard proxy.
//!
//! Serves a single leaderboard endpoint that forwards the Thrill referral
//! API's streamer leaderboard for the current half-month, authenticating
//! with a session token from the environment.
//!
//! # Window
//!
//! The queried range is recomputed from the UTC date on every request:
//!
//! ```text
//! 2024-12-09  ->  fromDate=2024-12-01  toDate=2024-12-15
//! 2024-12-20  ->  fromDate=2024-12-15  toDate=2025-01-01
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`leaderboard`]: Date windows, clock and Thrill API client
//! - [`api`]: HTTP handlers and router
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{ProxyError, Result};
