//! Welcome banner display for chat sessions.

use console::style;
use tux_core::persona::Personality;
use tux_types::llm::ModelSpec;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(
    persona: &Personality,
    spec: &ModelSpec,
    credential_count: usize,
    session_id: &str,
) {
    println!();
    println!(
        "  {} {}",
        style(&persona.name).cyan().bold(),
        style(format!("- {}", persona.title)).dim()
    );
    println!("  {}", style(persona.expertise.join(" | ")).dim());
    println!();
    println!("  {}    {}", style("Model:").bold(), style(&spec.primary).dim());
    println!("  {}   {}", style("Backup:").bold(), style(&spec.backup).dim());
    println!("  {} {}", style("API keys:").bold(), style(credential_count).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
