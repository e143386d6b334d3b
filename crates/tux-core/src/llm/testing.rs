//! Scripted completion client shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tux_types::credential::Credential;
use tux_types::error::LlmError;
use tux_types::llm::{CompletionRequest, CompletionResponse, Message, StopReason, Usage};

use super::client::CompletionClient;
use super::credential_pool::CredentialPool;

/// What the client saw on one call.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub key: String,
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Replays a fixed script of results and records every call.
///
/// Once the script runs dry every call fails with a transient error.
pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedClient {
    pub(crate) fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn calls(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }
}

impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        credential: &Credential,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            key: credential.expose().to_string(),
            model: request.model.clone(),
            messages: request.messages.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        });
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(content)) => Ok(CompletionResponse {
                id: "cmpl-test".to_string(),
                content,
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
            }),
            Some(Err(err)) => Err(err),
            None => Err(LlmError::Transient {
                message: "script exhausted".to_string(),
            }),
        }
    }
}

pub(crate) fn pool_of(keys: &[&str]) -> CredentialPool {
    CredentialPool::new(keys.iter().map(|k| Credential::new(*k)).collect()).unwrap()
}
