//! Business logic for the Tux assistant.
//!
//! This crate defines the `CompletionClient` port that the infrastructure
//! layer implements, the resilience layer built on top of it, and the
//! conversation session that callers talk to. It depends only on
//! `tux-types` -- never on `tux-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
pub mod persona;
