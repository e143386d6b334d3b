//! GroqClient -- concrete [`CompletionClient`] implementation for Groq.
//!
//! Sends requests to the OpenAI-compatible chat-completions endpoint
//! (`{base_url}/chat/completions`) with a bearer credential. One call is one
//! HTTP request; retries belong to the resilience layer in tux-core.
//!
//! Failures are classified before they leave this module:
//! - invalid request fields are rejected before any network I/O as
//!   `Configuration`
//! - HTTP errors go through `classify_status` on the status and body
//! - transport errors, timeouts, malformed bodies and empty choices are
//!   `Transient`

use std::time::Duration;

use tux_core::llm::classify::classify_status;
use tux_core::llm::client::CompletionClient;
use tux_types::credential::Credential;
use tux_types::error::LlmError;
use tux_types::llm::{CompletionRequest, CompletionResponse, StopReason, Usage};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ErrorEnvelope, WireMessage};

/// Upper bound accepted by the API for `temperature`.
const MAX_TEMPERATURE: f64 = 2.0;

/// Groq chat-completions client.
///
/// Holds no credential: the active key is passed per call by the resilience
/// layer. Does not derive `Debug`.
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Reject requests the API would refuse, without touching the network.
    fn validate(credential: &Credential, request: &CompletionRequest) -> Result<(), LlmError> {
        if credential.is_blank() {
            return Err(LlmError::Configuration {
                message: "API key is empty".to_string(),
            });
        }
        if request.model.trim().is_empty() {
            return Err(LlmError::Configuration {
                message: "model identifier is empty".to_string(),
            });
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&request.temperature) {
            return Err(LlmError::Configuration {
                message: format!(
                    "temperature {} outside [0, {MAX_TEMPERATURE}]",
                    request.temperature
                ),
            });
        }
        if request.max_tokens == 0 {
            return Err(LlmError::Configuration {
                message: "max_tokens must be positive".to_string(),
            });
        }
        Ok(())
    }

    fn to_wire_request(request: &CompletionRequest) -> ChatCompletionRequest<'_> {
        ChatCompletionRequest {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role(),
                    content: m.content(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    /// Build a classified error from a non-success response.
    fn error_from_response(status: reqwest::StatusCode, body: &str) -> LlmError {
        let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.code {
                Some(code) => format!("{} ({code})", envelope.error.message),
                None => envelope.error.message,
            },
            Err(_) => body.trim().to_string(),
        };
        let kind = classify_status(status.as_u16(), body);
        LlmError::from_kind(kind, format!("HTTP {status}: {detail}"))
    }
}

impl CompletionClient for GroqClient {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        Self::validate(credential, request)?;

        let body = Self::to_wire_request(request);
        let response = self
            .client
            .post(self.url())
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transient {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let err = Self::error_from_response(status, &error_body);
            tracing::debug!(status = status.as_u16(), kind = %err.kind(), "Groq returned an error");
            return Err(err);
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::Transient {
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| LlmError::Transient {
            message: "response contained no choices".to_string(),
        })?;
        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::Transient {
                message: "response contained empty content".to_string(),
            })?;

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or(StopReason::EndTurn);
        let usage = parsed
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();
        let model = if parsed.model.is_empty() {
            request.model.clone()
        } else {
            parsed.model
        };

        Ok(CompletionResponse {
            id: parsed.id,
            content,
            model,
            stop_reason,
            usage,
        })
    }
}
