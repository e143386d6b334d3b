//! Groq chat-completions client (OpenAI-compatible wire format).

pub mod client;
pub mod types;

pub use client::GroqClient;
