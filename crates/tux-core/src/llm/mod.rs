//! LLM access abstractions for Tux.
//!
//! - `CompletionClient`: RPITIT trait for concrete upstream clients
//! - `BoxCompletionClient`: object-safe wrapper for dynamic dispatch
//! - `CredentialPool`: ordered credentials with a rotating active index
//! - `classify`: heuristic error classification
//! - `ResilientCompletionService`: bounded retry, rotation and model fallback

pub mod box_client;
pub mod classify;
pub mod client;
pub mod credential_pool;
pub mod resilient;

#[cfg(test)]
pub(crate) mod testing;
