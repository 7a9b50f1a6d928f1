//! Mock leaderboard source for unit testing.
//!
//! Answers every call with a scripted reply and records what it was asked,
//! without making network requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::UpstreamError;

use super::client::LeaderboardSource;

/// Scripted reply of the mock.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with this JSON payload.
    Json(Value),
    /// 2xx with a raw body, decoded like a real response.
    Body(String),
    /// Non-2xx status with a body.
    Status(u16, String),
    /// Transport failure with this message.
    Transport(String),
}

/// A request seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Full upstream URL.
    pub url: Url,
    /// Token passed for the cookie.
    pub token: String,
}

/// Mock leaderboard source for testing.
#[derive(Debug, Clone)]
pub struct MockLeaderboardSource {
    reply: MockReply,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<RecordedRequest>>>,
}

impl MockLeaderboardSource {
    /// Create a mock answering with `reply`.
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Mock answering 200 with `value`.
    pub fn json(value: Value) -> Self {
        Self::new(MockReply::Json(value))
    }

    /// Mock answering with an error status.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockReply::Status(status, body.into()))
    }

    /// Mock failing before any response.
    pub fn transport_error(message: impl Into<String>) -> Self {
        Self::new(MockReply::Transport(message.into()))
    }

    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeaderboardSource for MockLeaderboardSource {
    async fn fetch(&self, url: &Url, token: &str) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(RecordedRequest {
            url: url.clone(),
            token: token.to_string(),
        });

        match &self.reply {
            MockReply::Json(value) => Ok(value.clone()),
            MockReply::Body(body) => Ok(serde_json::from_str(body)?),
            MockReply::Status(status, body) => Err(UpstreamError::Status {
                status: *status,
                body: body.clone(),
            }),
            MockReply::Transport(message) => Err(UpstreamError::Transport(message.clone())),
        }
    }
}
