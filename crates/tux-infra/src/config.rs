//! Configuration loader for Tux.
//!
//! Reads `tux.toml` and deserializes it into [`AssistantConfig`], then layers
//! environment variable overrides on top. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;
use std::str::FromStr;

use tux_types::config::AssistantConfig;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tux.toml";

/// Load configuration from `path` (or `./tux.toml`) and apply env overrides.
pub async fn load_config(path: Option<&Path>) -> AssistantConfig {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut config = read_config_file(path).await;
    apply_env_overrides(&mut config);
    config
}

/// Read and parse a TOML config file.
///
/// - If the file does not exist, returns [`AssistantConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn read_config_file(path: &Path) -> AssistantConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return AssistantConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AssistantConfig::default();
        }
    };

    match toml::from_str::<AssistantConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AssistantConfig::default()
        }
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut AssistantConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary variable lookup.
///
/// Recognised variables: `GROQ_MODEL`, `GROQ_MODEL_BACKUP`, `GROQ_BASE_URL`,
/// `GROQ_TIMEOUT_SECS`, `TEMPERATURE`, `MAX_TOKENS`, `MAX_RETRIES`,
/// `HISTORY_WINDOW`, `TUX_SEED`. Blank values are ignored; unparsable
/// numbers are ignored with a warning.
pub fn apply_overrides(config: &mut AssistantConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(model) = get("GROQ_MODEL") {
        config.model = model.trim().to_string();
    }
    if let Some(backup) = get("GROQ_MODEL_BACKUP") {
        config.backup_model = backup.trim().to_string();
    }
    if let Some(url) = get("GROQ_BASE_URL") {
        config.base_url = url.trim().to_string();
    }
    override_parsed(&get, "GROQ_TIMEOUT_SECS", &mut config.timeout_secs);
    override_parsed(&get, "TEMPERATURE", &mut config.temperature);
    override_parsed(&get, "MAX_TOKENS", &mut config.max_tokens);
    override_parsed(&get, "MAX_RETRIES", &mut config.max_retries);
    override_parsed(&get, "HISTORY_WINDOW", &mut config.history_window);

    if let Some(raw) = get("TUX_SEED") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(err) => tracing::warn!(var = "TUX_SEED", value = %raw, "Ignoring override: {err}"),
        }
    }
}

fn override_parsed<T>(get: &impl Fn(&str) -> Option<String>, key: &str, target: &mut T)
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = get(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *target = value,
        Err(err) => tracing::warn!(var = key, value = %raw, "Ignoring override: {err}"),
    }
}
