//! Leaderboard module for the bi-weekly Thrill referral leaderboard.
//!
//! This module handles:
//! - Date window computation
//! - The UTC clock abstraction
//! - Thrill API client
//! - Mock source for testing

pub mod client;
pub mod clock;
pub mod mock;
pub mod window;

pub use client::{leaderboard_url, token_cookie, LeaderboardSource, ThrillClient};
pub use clock::{Clock, FixedClock, SystemClock};
pub use mock::{MockLeaderboardSource, MockReply, RecordedRequest};
pub use window::{format_date, parse_date, DateWindow};
