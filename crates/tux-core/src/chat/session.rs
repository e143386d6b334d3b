//! Conversation session.
//!
//! Owns the transcript and the resilient service for one conversation.
//! Every `send` builds the window `[system, last K history entries, new user
//! message]`, completes it, and records the outcome:
//!
//! - success: the raw assistant text is appended to history and the
//!   transformed text is returned for display
//! - failure: only the user message stays in history and a non-empty notice
//!   is returned

use tux_types::chat::{Reply, SessionStats};
use tux_types::llm::{Message, ModelSpec, RetryPolicy};
use uuid::Uuid;

use crate::llm::resilient::{CompletionMetrics, ResilientCompletionService};
use crate::persona::{PlainText, ResponseTransform};

use super::history::ConversationHistory;

/// Default number of prior history entries included in each window.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// A single conversation with the assistant.
///
/// `send` takes `&mut self`, so one session never has two requests in
/// flight. Use `SessionHandle` to share a session between tasks.
pub struct ConversationSession {
    id: Uuid,
    system_prompt: String,
    history: ConversationHistory,
    service: ResilientCompletionService,
    spec: ModelSpec,
    policy: RetryPolicy,
    window: usize,
    transform: Box<dyn ResponseTransform>,
    stats: SessionStats,
}

impl ConversationSession {
    /// Create a session with the default window and no decoration.
    pub fn new(
        service: ResilientCompletionService,
        spec: ModelSpec,
        policy: RetryPolicy,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            system_prompt: system_prompt.into(),
            history: ConversationHistory::new(),
            service,
            spec,
            policy,
            window: DEFAULT_HISTORY_WINDOW,
            transform: Box::new(PlainText),
            stats: SessionStats::new(),
        }
    }

    /// Number of prior history entries included in each window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_transform(mut self, transform: Box<dyn ResponseTransform>) -> Self {
        self.transform = transform;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Send one user message and wait for the reply.
    pub async fn send(&mut self, user_text: &str) -> Reply {
        let user = Message::user(user_text);
        let window = self.build_window(&user);
        self.history.push(user);
        self.stats.messages_sent += 1;

        tracing::debug!(
            session_id = %self.id,
            window_len = window.len(),
            history_len = self.history.len(),
            "Sending message"
        );

        match self.service.complete(&window, &self.policy, &self.spec).await {
            Ok(outcome) => {
                let display = self.transform.transform(&outcome.text);
                self.history.push(Message::assistant(outcome.text));

                self.stats.answered_turns += 1;
                self.stats.input_tokens += u64::from(outcome.usage.input_tokens);
                self.stats.output_tokens += u64::from(outcome.usage.output_tokens);
                if outcome.used_backup {
                    self.stats.backup_answers += 1;
                }

                Reply::Answer { text: display }
            }
            Err(failure) => {
                self.stats.failed_turns += 1;
                tracing::warn!(
                    session_id = %self.id,
                    kind = %failure.kind,
                    error = %failure.last_message,
                    "Turn failed"
                );
                Reply::Failure {
                    kind: failure.kind,
                    notice: self.transform.failure_notice(&failure),
                }
            }
        }
    }

    /// Window for the next request: system prompt, recent history, new message.
    pub fn build_window(&self, user: &Message) -> Vec<Message> {
        let recent = self.history.recent(self.window);
        let mut window = Vec::with_capacity(recent.len() + 2);
        window.push(Message::system(self.system_prompt.as_str()));
        window.extend_from_slice(recent);
        window.push(user.clone());
        window
    }

    /// Clear the transcript. Stats and credential position are kept.
    pub fn reset(&mut self) {
        tracing::info!(
            session_id = %self.id,
            cleared = self.history.len(),
            "Conversation reset"
        );
        self.history.clear();
    }

    /// Number of prior history entries included in each window.
    pub fn window_size(&self) -> usize {
        self.window
    }

    pub fn history(&self) -> &[Message] {
        self.history.messages()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn service_metrics(&self) -> CompletionMetrics {
        self.service.metrics()
    }

    pub fn active_credential(&self) -> usize {
        self.service.pool().active_index()
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("history_len", &self.history.len())
            .field("window", &self.window)
            .field("spec", &self.spec)
            .field("policy", &self.policy)
            .finish()
    }
}
