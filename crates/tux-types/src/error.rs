use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building the assistant from configuration.
///
/// These are fatal at startup and never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API credentials configured (set GROQ_API_KEY_1 .. GROQ_API_KEY_9)")]
    NoCredentials,

    #[error("invalid model settings: {0}")]
    InvalidModelSpec(String),

    #[error("invalid retry policy: {0}")]
    InvalidRetryPolicy(String),
}

/// Classification of a single upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Quota or rate exhaustion on the current credential.
    RateLimited,
    /// Any other remote-side or transport failure.
    TransientFailure,
    /// Request rejected as invalid (credential or model) before or by the remote.
    ConfigurationError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::RateLimited => write!(f, "rate_limited"),
            ErrorKind::TransientFailure => write!(f, "transient_failure"),
            ErrorKind::ConfigurationError => write!(f, "configuration_error"),
        }
    }
}

/// Classified error from a single completion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("rate limited: {message}")]
    RateLimited { message: String },

    #[error("transient failure: {message}")]
    Transient { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl LlmError {
    /// Build an error of the given kind.
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::RateLimited => LlmError::RateLimited { message },
            ErrorKind::TransientFailure => LlmError::Transient { message },
            ErrorKind::ConfigurationError => LlmError::Configuration { message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::RateLimited { .. } => ErrorKind::RateLimited,
            LlmError::Transient { .. } => ErrorKind::TransientFailure,
            LlmError::Configuration { .. } => ErrorKind::ConfigurationError,
        }
    }

    /// The raw upstream message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            LlmError::RateLimited { message }
            | LlmError::Transient { message }
            | LlmError::Configuration { message } => message,
        }
    }
}

/// Terminal outcome category of a failed resilient completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Every attempt allowed by the retry policy failed.
    RetriesExhausted,
    /// The service could not run at all (e.g. invalid settings).
    Configuration,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::RetriesExhausted => write!(f, "retries_exhausted"),
            FailureKind::Configuration => write!(f, "configuration"),
        }
    }
}

/// Tagged failure returned by the resilient completion service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {last_message}")]
pub struct CompletionFailure {
    pub kind: FailureKind,
    /// Message of the last upstream error observed.
    pub last_message: String,
}

/// Errors from the shared session handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a request is already in flight for this session")]
    Busy,
}
