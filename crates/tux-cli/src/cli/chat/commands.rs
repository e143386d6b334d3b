//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. The bare words `quit`, `exit`, `bye` and `reset`
//! are accepted too, since that is what people type.

use console::style;

/// Available commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the conversation history.
    Reset,
    /// Show session statistics.
    Stats,
    /// Show conversation history for this session.
    History,
    /// Exit the chat.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a command.
///
/// Returns `None` for ordinary chat messages.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    match lower.as_str() {
        "quit" | "exit" | "bye" => return Some(ChatCommand::Exit),
        "reset" => return Some(ChatCommand::Reset),
        _ => {}
    }

    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = lower.split_whitespace().next().unwrap_or_default();
    match cmd {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/reset" | "/new" => Some(ChatCommand::Reset),
        "/stats" => Some(ChatCommand::Stats),
        "/history" => Some(ChatCommand::History),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!("  {}    {}", style("/reset").cyan(), "Forget the conversation so far");
    println!("  {}    {}", style("/stats").cyan(), "Show session statistics");
    println!("  {}  {}", style("/history").cyan(), "Show conversation history");
    println!("  {}     {}", style("/exit").cyan(), "End the chat");
    println!();
    println!("  {}", style("Ctrl+D also exits").dim());
    println!();
}
