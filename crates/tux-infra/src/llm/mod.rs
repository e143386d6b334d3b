//! LLM client implementations.
//!
//! Contains the concrete Groq implementation of the [`CompletionClient`]
//! trait defined in `tux-core`, and a factory ([`create_client`]) that builds
//! it from an [`AssistantConfig`].
//!
//! [`CompletionClient`]: tux_core::llm::client::CompletionClient

pub mod groq;

use std::time::Duration;

use anyhow::Context;
use tux_core::llm::box_client::BoxCompletionClient;
use tux_types::config::AssistantConfig;

use self::groq::GroqClient;

/// Create a [`BoxCompletionClient`] from the assistant configuration.
pub fn create_client(config: &AssistantConfig) -> anyhow::Result<BoxCompletionClient> {
    let client = GroqClient::new(
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )
    .with_context(|| format!("failed to build HTTP client for {}", config.base_url))?;

    tracing::debug!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "Created Groq client"
    );

    Ok(BoxCompletionClient::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_from_defaults() {
        let client = create_client(&AssistantConfig::default()).unwrap();
        assert_eq!(client.name(), "groq");
    }
}
