//! CompletionClient trait definition.
//!
//! This is the port every upstream chat-completion backend implements.
//! Uses RPITIT for `complete` so implementations can be plain `async fn`s.

use tux_types::credential::Credential;
use tux_types::error::LlmError;
use tux_types::llm::{CompletionRequest, CompletionResponse};

/// Trait for chat-completion backends.
///
/// One call is exactly one upstream attempt: implementations must not retry.
/// Failures are returned already classified as [`LlmError`] variants, with
/// transport errors mapped to [`LlmError::Transient`].
///
/// Implementations live in tux-infra (e.g., `GroqClient`).
pub trait CompletionClient: Send + Sync {
    /// Human-readable backend name (e.g., "groq").
    fn name(&self) -> &str;

    /// Send `request` authorized by `credential` and return the first choice.
    fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
