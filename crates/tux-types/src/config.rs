//! Assistant configuration types.
//!
//! `AssistantConfig` mirrors the optional `tux.toml` file. Every field has a
//! default so an empty file (or no file at all) yields a working setup once
//! credentials are present in the environment.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::llm::{ModelSpec, RetryPolicy};

/// Default OpenAI-compatible endpoint for Groq.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Primary model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used when the primary is rejected.
    #[serde(default = "default_backup_model")]
    pub backup_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Total attempts per message (including the first).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds.
    #[serde(default)]
    pub retry_backoff_ms: u64,

    /// Number of prior history entries sent with each request.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP timeout for a single attempt.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Seed for the personality decoration. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_backup_model() -> String {
    "mixtral-8x7b-32768".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_retries() -> u32 {
    3
}

fn default_history_window() -> usize {
    10
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            backup_model: default_backup_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_retries: default_max_retries(),
            retry_backoff_ms: 0,
            history_window: default_history_window(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            seed: None,
        }
    }
}

impl AssistantConfig {
    /// Validated model settings for the resilience layer.
    pub fn model_spec(&self) -> Result<ModelSpec, ConfigError> {
        ModelSpec::new(
            self.model.clone(),
            self.backup_model.clone(),
            self.temperature,
            self.max_tokens,
        )
    }

    /// Validated retry settings for the resilience layer.
    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigError> {
        Ok(RetryPolicy::new(self.max_retries)?.with_backoff_ms(self.retry_backoff_ms))
    }
}
