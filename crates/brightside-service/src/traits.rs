use std::sync::Mutex;

use async_trait::async_trait;
use brightside_core::{MotivationRecord, Quote, RecordError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("api request failed: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
}

impl ServiceError {
    /// The one message shown to the user regardless of what actually went
    /// wrong. Diagnostic detail goes to the log, not the screen.
    pub fn user_message(&self) -> &'static str {
        "Could not get a motivational message from the AI. Please try again."
    }
}

/// Abstraction over the motivation backend.
///
/// The TUI and scheduler program against this trait. `GeminiService` is the
/// real HTTP implementation; `StaticMotivationService` serves tests.
#[async_trait]
pub trait MotivationService: Send + Sync {
    /// Fetch a fresh motivation record, tailored to `goals` when non-empty.
    async fn fetch_motivation(&self, goals: &str) -> Result<MotivationRecord, ServiceError>;
}

/// Canned implementation that records the goals it was called with.
pub struct StaticMotivationService {
    record: MotivationRecord,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl StaticMotivationService {
    pub fn new() -> Self {
        Self {
            record: MotivationRecord {
                quote: Quote {
                    text: "The secret of getting ahead is getting started.".into(),
                    author: "Mark Twain".into(),
                },
                thought: "Today is a fresh page.".into(),
                tip: "Do the smallest next step first.".into(),
            },
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn with_record(record: MotivationRecord) -> Self {
        Self {
            record,
            ..Self::new()
        }
    }

    /// Goals passed to each `fetch_motivation` call, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for StaticMotivationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MotivationService for StaticMotivationService {
    async fn fetch_motivation(&self, goals: &str) -> Result<MotivationRecord, ServiceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(goals.to_string());
        }
        if self.fail {
            return Err(ServiceError::Api("static failure".into()));
        }
        Ok(self.record.clone())
    }
}
