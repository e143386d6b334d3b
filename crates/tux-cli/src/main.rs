//! Tux terminal assistant entry point.
//!
//! Binary name: `tux`
//!
//! Loads `.env` and configuration, builds the Groq client behind the
//! resilience layer, then runs the interactive chat loop.

mod cli;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use tux_core::chat::ConversationSession;
use tux_core::llm::credential_pool::CredentialPool;
use tux_core::llm::resilient::ResilientCompletionService;
use tux_core::persona::{Personality, SeededPersonality};
use tux_infra::config::load_config;
use tux_infra::llm::create_client;
use tux_infra::secret::env::load_credentials;
use tux_observe::tracing_setup::{default_directive, init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine; keys may come from the real environment.
    let dotenv = dotenvy::dotenv();

    init_tracing(default_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Ok(path) = &dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).await;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let spec = config.model_spec().context("invalid model settings")?;
    let policy = config.retry_policy().context("invalid retry settings")?;
    let pool = CredentialPool::new(load_credentials())?;
    let credential_count = pool.len();
    let client = create_client(&config)?;

    tracing::info!(
        model = %spec.primary,
        backup = %spec.backup,
        credentials = credential_count,
        max_attempts = policy.max_attempts,
        "Starting Tux"
    );

    let persona = Personality::tux();
    let service = ResilientCompletionService::new(client, pool);
    let session = ConversationSession::new(service, spec, policy, persona.system_prompt())
        .with_window(config.history_window)
        .with_transform(Box::new(SeededPersonality::new(persona.clone(), config.seed)));

    cli::chat::loop_runner::run_chat_loop(
        session,
        SeededPersonality::new(persona, config.seed),
        credential_count,
        cli.quiet,
    )
    .await
}
