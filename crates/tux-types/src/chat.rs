//! Chat session domain types.
//!
//! `Reply` is what a conversation turn hands back to the presentation layer;
//! `SessionStats` and `SessionState` describe a running session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FailureKind;

/// Observable state of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No outstanding request.
    Idle,
    /// A request is in flight.
    AwaitingResponse,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::AwaitingResponse => write!(f, "awaiting_response"),
        }
    }
}

/// Result of one `send` on a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// The decorated model answer.
    Answer { text: String },
    /// The call failed; `notice` is a user-facing description.
    Failure { kind: FailureKind, notice: String },
}

impl Reply {
    /// Text to show the user, whichever variant this is.
    pub fn display_text(&self) -> &str {
        match self {
            Reply::Answer { text } => text,
            Reply::Failure { notice, .. } => notice,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Reply::Failure { .. })
    }
}

/// Running counters for a conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// User messages sent, answered or not.
    pub messages_sent: u64,
    /// Turns that produced an answer.
    pub answered_turns: u64,
    /// Turns that ended in a failure notice.
    pub failed_turns: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Turns answered by the backup model.
    pub backup_answers: u64,
    pub started_at: DateTime<Utc>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            messages_sent: 0,
            answered_turns: 0,
            failed_turns: 0,
            input_tokens: 0,
            output_tokens: 0,
            backup_answers: 0,
            started_at: Utc::now(),
        }
    }

    /// Minutes elapsed since the session started, rounded to one decimal.
    pub fn duration_minutes(&self) -> f64 {
        let secs = (Utc::now() - self.started_at).num_milliseconds() as f64 / 1000.0;
        (secs / 60.0 * 10.0).round() / 10.0
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
