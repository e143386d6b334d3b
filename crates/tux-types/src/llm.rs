//! LLM request/response types for Tux.
//!
//! These types model the data shapes for chat-completion interactions:
//! role-tagged messages, completion requests and responses, token usage,
//! and the model/retry settings the resilience layer runs with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in an LLM conversation.
///
/// Messages are immutable once created: the fields are private and only
/// readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Request to a completion client for a single chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Response from a completion client: the text of the first choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Reason why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::MaxTokens => write!(f, "max_tokens"),
            StopReason::ContentFilter => write!(f, "content_filter"),
        }
    }
}

impl FromStr for StopReason {
    type Err = String;

    /// Accepts both the internal names and the OpenAI-style `finish_reason` values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "end_turn" | "stop" => Ok(StopReason::EndTurn),
            "max_tokens" | "length" => Ok(StopReason::MaxTokens),
            "content_filter" => Ok(StopReason::ContentFilter),
            other => Err(format!("invalid stop reason: '{other}'")),
        }
    }
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Primary/backup model selection plus sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model tried first on every attempt.
    pub primary: String,
    /// Model tried once, with the same credential, when the primary is rejected.
    pub backup: String,
    /// Sampling temperature in `[0, 1]`.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

impl ModelSpec {
    /// Build a validated model spec.
    pub fn new(
        primary: impl Into<String>,
        backup: impl Into<String>,
        temperature: f64,
        max_output_tokens: u32,
    ) -> Result<Self, ConfigError> {
        let spec = Self {
            primary: primary.into(),
            backup: backup.into(),
            temperature,
            max_output_tokens,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary.trim().is_empty() {
            return Err(ConfigError::InvalidModelSpec(
                "primary model must not be empty".to_string(),
            ));
        }
        if self.backup.trim().is_empty() {
            return Err(ConfigError::InvalidModelSpec(
                "backup model must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidModelSpec(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(ConfigError::InvalidModelSpec(
                "max_output_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the request for one attempt against `model`.
    pub fn request_for(&self, model: &str, messages: &[Message]) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        }
    }
}

/// Bounded retry settings for the resilience layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first one.
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds (0 = retry immediately).
    #[serde(default)]
    pub backoff_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetryPolicy(
                "max_attempts must be positive".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            backoff_ms: 0,
        })
    }

    pub fn with_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.backoff_ms = backoff_ms;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::System, MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("hello");
        assert_eq!(msg.role(), MessageRole::User);
        assert_eq!(msg.content(), "hello");
        assert_eq!(Message::system("s").role(), MessageRole::System);
        assert_eq!(Message::assistant("a").role(), MessageRole::Assistant);
    }

    #[test]
    fn test_message_serde_wire_shape() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_stop_reason_accepts_openai_names() {
        assert_eq!("stop".parse::<StopReason>().unwrap(), StopReason::EndTurn);
        assert_eq!("length".parse::<StopReason>().unwrap(), StopReason::MaxTokens);
        assert!("tool_calls".parse::<StopReason>().is_err());
    }

    #[test]
    fn test_model_spec_validation() {
        assert!(ModelSpec::new("a", "b", 0.7, 4096).is_ok());
        assert!(ModelSpec::new("", "b", 0.7, 4096).is_err());
        assert!(ModelSpec::new("a", " ", 0.7, 4096).is_err());
        assert!(ModelSpec::new("a", "b", 1.5, 4096).is_err());
        assert!(ModelSpec::new("a", "b", -0.1, 4096).is_err());
        assert!(ModelSpec::new("a", "b", 0.7, 0).is_err());
    }

    #[test]
    fn test_request_for_uses_spec_settings() {
        let spec = ModelSpec::new("primary", "backup", 0.2, 128).unwrap();
        let req = spec.request_for("backup", &[Message::user("hi")]);
        assert_eq!(req.model, "backup");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.max_tokens, 128);
        assert!((req.temperature - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retry_policy() {
        assert_eq!(RetryPolicy::default().max_attempts, 3);
        assert!(RetryPolicy::new(0).is_err());
        let policy = RetryPolicy::new(5).unwrap().with_backoff_ms(250);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.backoff_ms, 250);
    }
}
