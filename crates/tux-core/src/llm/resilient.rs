//! Resilient completion service.
//!
//! Wraps a single `BoxCompletionClient` with a `CredentialPool` and turns
//! one logical "complete these messages" call into a bounded sequence of
//! upstream attempts:
//!
//! - `RateLimited`: rotate to the next credential, count the attempt
//! - `ConfigurationError` on the primary model: try the backup model once
//!   with the same credential; a failed backup counts as a transient failure
//! - `TransientFailure`: count the attempt, rotate only if another attempt
//!   will follow
//!
//! The service never sleeps unless the retry policy asks for a backoff.

use std::time::{Duration, Instant};

use tracing::Instrument;
use tux_types::error::{CompletionFailure, ErrorKind, FailureKind, LlmError};
use tux_types::llm::{
    CompletionResponse, Message, ModelSpec, RetryPolicy, StopReason, Usage,
};

use super::box_client::BoxCompletionClient;
use super::credential_pool::CredentialPool;

/// Successful result of a resilient completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    /// Raw assistant text, never empty.
    pub text: String,
    /// Model that produced the text.
    pub model: String,
    /// 1-based number of the attempt that succeeded.
    pub attempts: u32,
    /// Credential index that produced the text.
    pub credential_index: usize,
    /// Whether the backup model answered.
    pub used_backup: bool,
    pub usage: Usage,
    pub stop_reason: StopReason,
}

/// Running counters for one service instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionMetrics {
    /// Logical `complete` calls.
    pub calls: u64,
    pub successes: u64,
    pub failures: u64,
    /// Upstream errors observed, across all attempts.
    pub upstream_errors: u64,
    /// Times the backup model was tried.
    pub fallback_activations: u64,
    /// Credential rotations performed.
    pub rotations: u64,
    /// Wall time spent in `complete`, summed over all calls.
    pub total_latency: Duration,
}

impl CompletionMetrics {
    /// Mean wall time per logical call, zero before the first call.
    pub fn average_latency(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        self.total_latency / self.calls as u32
    }

    /// Share of calls that ended in a failure.
    pub fn error_rate(&self) -> f64 {
        ratio(self.failures, self.calls)
    }

    /// Backup model activations per call.
    pub fn fallback_rate(&self) -> f64 {
        ratio(self.fallback_activations, self.calls)
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 }
}

/// Retry, credential rotation and model fallback around one client.
///
/// Holds its own copy of the pool. Callers needing concurrent access put the
/// service behind a lock (see `SessionHandle`).
#[derive(Debug)]
pub struct ResilientCompletionService {
    client: BoxCompletionClient,
    pool: CredentialPool,
    metrics: CompletionMetrics,
}

impl ResilientCompletionService {
    pub fn new(client: BoxCompletionClient, pool: CredentialPool) -> Self {
        Self {
            client,
            pool,
            metrics: CompletionMetrics::default(),
        }
    }

    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    pub fn metrics(&self) -> CompletionMetrics {
        self.metrics
    }

    /// Complete `messages` with bounded retries.
    ///
    /// `messages` is sent unchanged on every attempt. Returns
    /// `FailureKind::Configuration` without contacting the client when the
    /// spec or policy is invalid, and `FailureKind::RetriesExhausted` once
    /// `policy.max_attempts` attempts have failed.
    pub async fn complete(
        &mut self,
        messages: &[Message],
        policy: &RetryPolicy,
        spec: &ModelSpec,
    ) -> Result<CompletionOutcome, CompletionFailure> {
        self.metrics.calls += 1;
        let started = Instant::now();
        let result = self.run(messages, policy, spec).await;
        self.metrics.total_latency += started.elapsed();
        result
    }

    async fn run(
        &mut self,
        messages: &[Message],
        policy: &RetryPolicy,
        spec: &ModelSpec,
    ) -> Result<CompletionOutcome, CompletionFailure> {
        if let Err(err) = spec.validate() {
            return Err(self.fail(FailureKind::Configuration, err.to_string()));
        }
        if policy.max_attempts == 0 {
            return Err(self.fail(
                FailureKind::Configuration,
                "max_attempts must be positive".to_string(),
            ));
        }

        let mut attempt: u32 = 0;
        loop {
            let credential_index = self.pool.active_index();

            let err = match self.attempt(&spec.primary, messages, spec, attempt).await {
                Ok(response) => {
                    return Ok(self.succeed(response, attempt, credential_index, false));
                }
                Err(err) => err,
            };
            self.metrics.upstream_errors += 1;

            let err = if err.kind() == ErrorKind::ConfigurationError {
                self.metrics.fallback_activations += 1;
                tracing::warn!(
                    primary = %spec.primary,
                    backup = %spec.backup,
                    error = %err,
                    "Primary model rejected, trying backup"
                );
                match self.attempt(&spec.backup, messages, spec, attempt).await {
                    Ok(response) => {
                        return Ok(self.succeed(response, attempt, credential_index, true));
                    }
                    Err(backup_err) => {
                        self.metrics.upstream_errors += 1;
                        tracing::warn!(
                            backup = %spec.backup,
                            error = %backup_err,
                            "Backup model failed"
                        );
                        LlmError::Transient {
                            message: backup_err.message().to_string(),
                        }
                    }
                }
            } else {
                err
            };

            attempt += 1;
            let retrying = attempt < policy.max_attempts;

            match err.kind() {
                ErrorKind::RateLimited => {
                    let next = self.rotate();
                    tracing::warn!(
                        attempt,
                        max_attempts = policy.max_attempts,
                        credential_index = next,
                        "Rate limited, rotated credential"
                    );
                }
                _ => {
                    if retrying {
                        let next = self.rotate();
                        tracing::warn!(
                            attempt,
                            max_attempts = policy.max_attempts,
                            credential_index = next,
                            error = %err,
                            "Attempt failed, retrying"
                        );
                    }
                }
            }

            if !retrying {
                tracing::error!(
                    attempts = attempt,
                    error = %err,
                    "All completion attempts failed"
                );
                return Err(self.fail(FailureKind::RetriesExhausted, err.message().to_string()));
            }

            if policy.backoff_ms > 0 {
                tokio::time::sleep(Duration::from_millis(policy.backoff_ms)).await;
            }
        }
    }

    /// One upstream call against `model` with the active credential.
    async fn attempt(
        &self,
        model: &str,
        messages: &[Message],
        spec: &ModelSpec,
        attempt: u32,
    ) -> Result<CompletionResponse, LlmError> {
        let request = spec.request_for(model, messages);
        let span = tracing::info_span!(
            "gen_ai.complete",
            gen_ai.system = %self.client.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = request.temperature,
            attempt,
            credential_index = self.pool.active_index(),
        );
        self.client
            .complete(self.pool.current(), &request)
            .instrument(span)
            .await
    }

    fn rotate(&mut self) -> usize {
        self.metrics.rotations += 1;
        self.pool.rotate()
    }

    fn succeed(
        &mut self,
        response: CompletionResponse,
        attempt: u32,
        credential_index: usize,
        used_backup: bool,
    ) -> CompletionOutcome {
        self.metrics.successes += 1;
        tracing::debug!(
            model = %response.model,
            attempts = attempt + 1,
            credential_index,
            used_backup,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Completion succeeded"
        );
        CompletionOutcome {
            text: response.content,
            model: response.model,
            attempts: attempt + 1,
            credential_index,
            used_backup,
            usage: response.usage,
            stop_reason: response.stop_reason,
        }
    }

    fn fail(&mut self, kind: FailureKind, last_message: String) -> CompletionFailure {
        self.metrics.failures += 1;
        CompletionFailure { kind, last_message }
    }
}
