//! Shared access to one conversation session.
//!
//! `ConversationSession::send` already forbids overlapping requests through
//! `&mut self`. `SessionHandle` is the cloneable form for callers that hold
//! the session from several tasks: `send` waits its turn (FIFO, via the
//! tokio mutex), `try_send` refuses with `SessionError::Busy` instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;
use tux_types::chat::{Reply, SessionState, SessionStats};
use tux_types::error::SessionError;
use tux_types::llm::Message;

use super::session::ConversationSession;

#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<ConversationSession>>,
    pending: Arc<AtomicUsize>,
}

/// Decrements the pending counter when a send finishes or is cancelled.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SessionHandle {
    pub fn new(session: ConversationSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Send a message, queueing behind any request already in flight.
    pub async fn send(&self, text: &str) -> Reply {
        let _pending = PendingGuard::enter(&self.pending);
        let mut session = self.inner.lock().await;
        session.send(text).await
    }

    /// Send a message only if the session is idle.
    pub async fn try_send(&self, text: &str) -> Result<Reply, SessionError> {
        let mut session = self.inner.try_lock().map_err(|_| SessionError::Busy)?;
        let _pending = PendingGuard::enter(&self.pending);
        Ok(session.send(text).await)
    }

    /// `AwaitingResponse` while any send is queued or in flight.
    pub fn state(&self) -> SessionState {
        if self.pending.load(Ordering::SeqCst) > 0 {
            SessionState::AwaitingResponse
        } else {
            SessionState::Idle
        }
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }

    pub async fn history(&self) -> Vec<Message> {
        self.inner.lock().await.history().to_vec()
    }

    pub async fn stats(&self) -> SessionStats {
        self.inner.lock().await.stats().clone()
    }

    /// Run `f` against the session once it is free.
    pub async fn with_session<R>(&self, f: impl FnOnce(&ConversationSession) -> R) -> R {
        let session = self.inner.lock().await;
        f(&session)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::{Notify, Semaphore};
    use tux_types::credential::Credential;
    use tux_types::error::LlmError;
    use tux_types::llm::{
        CompletionRequest, CompletionResponse, ModelSpec, RetryPolicy, StopReason, Usage,
    };

    use super::*;
    use crate::llm::box_client::BoxCompletionClient;
    use crate::llm::client::CompletionClient;
    use crate::llm::resilient::ResilientCompletionService;
    use crate::llm::testing::pool_of;

    /// Blocks every call until the test releases a permit, echoing the last
    /// user message back.
    struct GatedClient {
        gate: Arc<Semaphore>,
        entered: Arc<Notify>,
    }

    impl CompletionClient for GatedClient {
        fn name(&self) -> &str {
            "gated"
        }

        async fn complete(
            &self,
            _credential: &Credential,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.entered.notify_one();
            let permit = self.gate.acquire().await.map_err(|e| LlmError::Transient {
                message: e.to_string(),
            })?;
            permit.forget();
            let last = request
                .messages
                .last()
                .map(|m| m.content().to_string())
                .unwrap_or_default();
            Ok(CompletionResponse {
                id: "cmpl-gated".to_string(),
                content: format!("echo: {last}"),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    fn gated_handle() -> (SessionHandle, Arc<Semaphore>, Arc<Notify>) {
        let gate = Arc::new(Semaphore::new(0));
        let entered = Arc::new(Notify::new());
        let client = GatedClient {
            gate: Arc::clone(&gate),
            entered: Arc::clone(&entered),
        };
        let service =
            ResilientCompletionService::new(BoxCompletionClient::new(client), pool_of(&["k1"]));
        let session = ConversationSession::new(
            service,
            ModelSpec::new("primary", "backup", 0.5, 64).unwrap(),
            RetryPolicy::new(1).unwrap(),
            "system",
        );
        (SessionHandle::new(session), gate, entered)
    }

    #[tokio::test]
    async fn test_idle_before_and_after_send() {
        let (handle, gate, _entered) = gated_handle();
        assert_eq!(handle.state(), SessionState::Idle);

        gate.add_permits(1);
        let reply = handle.send("ping").await;

        assert_eq!(reply.display_text(), "echo: ping");
        assert_eq!(handle.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn test_try_send_while_in_flight_is_busy() {
        let (handle, gate, entered) = gated_handle();

        let background = handle.clone();
        let task = tokio::spawn(async move { background.send("first").await });
        entered.notified().await;

        assert_eq!(handle.state(), SessionState::AwaitingResponse);
        assert_eq!(handle.try_send("second").await, Err(SessionError::Busy));

        gate.add_permits(1);
        let reply = task.await.unwrap();
        assert_eq!(reply.display_text(), "echo: first");
        assert_eq!(handle.state(), SessionState::Idle);

        // The rejected message never reached the history.
        assert_eq!(
            handle.history().await,
            vec![Message::user("first"), Message::assistant("echo: first")]
        );
    }

    #[tokio::test]
    async fn test_queued_sends_complete_in_order() {
        let (handle, gate, entered) = gated_handle();

        let first = {
            let h = handle.clone();
            tokio::spawn(async move { h.send("one").await })
        };
        entered.notified().await;
        let second = {
            let h = handle.clone();
            tokio::spawn(async move { h.send("two").await })
        };
        tokio::task::yield_now().await;

        gate.add_permits(2);
        assert_eq!(first.await.unwrap().display_text(), "echo: one");
        assert_eq!(second.await.unwrap().display_text(), "echo: two");

        let history = handle.history().await;
        assert_eq!(history.len(), 4);
        assert_eq!(history[0], Message::user("one"));
        assert_eq!(history[2], Message::user("two"));
        assert_eq!(handle.stats().await.answered_turns, 2);
    }

    #[tokio::test]
    async fn test_reset_through_handle() {
        let (handle, gate, _entered) = gated_handle();
        gate.add_permits(1);
        handle.send("hello").await;

        handle.reset().await;

        assert!(handle.history().await.is_empty());
        let sent = handle.with_session(|s| s.stats().messages_sent).await;
        assert_eq!(sent, 1);
    }
}
