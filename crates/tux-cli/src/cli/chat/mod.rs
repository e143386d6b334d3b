//! Interactive chat loop.
//!
//! Reads lines from stdin, dispatches slash commands, and sends everything
//! else to the conversation session with a spinner while waiting.

pub mod banner;
pub mod commands;
pub mod loop_runner;
