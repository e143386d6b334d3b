//! Main interactive chat loop.

use std::io::Write;
use std::time::{Duration, Instant};

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tux_core::chat::ConversationSession;
use tux_core::persona::SeededPersonality;
use tux_types::chat::Reply;
use tux_types::llm::MessageRole;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};

/// Run the chat loop until `/exit` or end of input.
pub async fn run_chat_loop(
    mut session: ConversationSession,
    mut persona: SeededPersonality,
    credential_count: usize,
    quiet: bool,
) -> anyhow::Result<()> {
    let name = persona.personality().name.clone();

    if !quiet {
        print_welcome_banner(
            persona.personality(),
            session.spec(),
            credential_count,
            &session.id().to_string(),
        );
    }
    println!("  {} {}", style(&name).cyan().bold(), persona.greeting());
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", style("You >").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Reset => {
                    session.reset();
                    println!("  {}", style(persona.personality().reset_notice()).dim());
                    println!();
                }
                ChatCommand::Stats => print_stats(&session),
                ChatCommand::History => print_history(&session, &name),
                ChatCommand::Exit => break,
                ChatCommand::Unknown(cmd) => {
                    println!(
                        "  {} Unknown command {}. Type /help for the list.",
                        style("?").yellow().bold(),
                        style(cmd).cyan()
                    );
                }
            }
            continue;
        }

        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("{name} is thinking..."));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let start = Instant::now();
        let reply = session.send(text).await;
        spinner.finish_and_clear();

        match &reply {
            Reply::Answer { text } => {
                println!();
                println!("  {} {}", style(&name).cyan().bold(), text);
                println!(
                    "  {}",
                    style(format!("({:.1}s)", start.elapsed().as_secs_f64())).dim()
                );
            }
            Reply::Failure { notice, .. } => {
                println!();
                eprintln!("  {} {}", style("!").red().bold(), notice);
                eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
            }
        }
        println!();
    }

    println!("  {} {}", style(&name).cyan().bold(), persona.farewell());
    Ok(())
}

fn print_stats(session: &ConversationSession) {
    let stats = session.stats();
    let metrics = session.service_metrics();

    println!();
    println!("  {}", style("Session stats:").bold());
    println!("  {:<18} {}", "Messages sent", stats.messages_sent);
    println!("  {:<18} {}", "Answered", stats.answered_turns);
    println!("  {:<18} {}", "Failed", stats.failed_turns);
    println!("  {:<18} {}", "History entries", session.history().len());
    println!(
        "  {:<18} {} in / {} out",
        "Tokens", stats.input_tokens, stats.output_tokens
    );
    println!("  {:<18} {}", "Backup answers", stats.backup_answers);
    println!("  {:<18} {}", "Key rotations", metrics.rotations);
    println!(
        "  {:<18} {:.2}s",
        "Avg response",
        metrics.average_latency().as_secs_f64()
    );
    println!(
        "  {:<18} {:.0}% errors / {:.0}% fallback",
        "Upstream",
        metrics.error_rate() * 100.0,
        metrics.fallback_rate() * 100.0
    );
    println!("  {:<18} {}", "Active key", session.active_credential() + 1);
    println!("  {:<18} {:.1} min", "Duration", stats.duration_minutes());
    println!();
}

fn print_history(session: &ConversationSession, name: &str) {
    let history = session.history();
    println!();
    if history.is_empty() {
        println!("  {}", style("(no messages yet)").dim());
    }
    for message in history {
        let speaker = match message.role() {
            MessageRole::User => style("You".to_string()).green().bold(),
            MessageRole::Assistant => style(name.to_string()).cyan().bold(),
            MessageRole::System => style("System".to_string()).dim(),
        };
        println!("  {speaker}: {}", message.content());
    }
    println!();
}
