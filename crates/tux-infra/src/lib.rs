//! Infrastructure layer for Tux.
//!
//! Contains the Groq implementation of the `CompletionClient` port defined in
//! `tux-core`, plus loaders for `tux.toml` and the `GROQ_API_KEY_*`
//! credentials.

pub mod config;
pub mod llm;
pub mod secret;
