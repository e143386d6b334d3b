//! Conversation state for Tux.
//!
//! - `ConversationHistory`: append-only transcript of user/assistant turns
//! - `ConversationSession`: builds the bounded window, drives the resilient
//!   service and records the outcome
//! - `SessionHandle`: shared, serialized access to one session

pub mod handle;
pub mod history;
pub mod session;

pub use handle::SessionHandle;
pub use history::ConversationHistory;
pub use session::ConversationSession;
