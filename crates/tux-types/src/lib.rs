//! Shared domain types for the Tux assistant.
//!
//! This crate contains the types passed between the resilience core, the
//! upstream client adapter and the CLI: messages, credentials, model and retry
//! settings, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, chrono, secrecy, thiserror.

pub mod chat;
pub mod config;
pub mod credential;
pub mod error;
pub mod llm;
