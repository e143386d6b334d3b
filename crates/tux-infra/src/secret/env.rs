//! Environment variable credential source.
//!
//! Keys are read from `GROQ_API_KEY_1` through `GROQ_API_KEY_9`, in that
//! order, which becomes the rotation order of the credential pool. A plain
//! `GROQ_API_KEY` is used only when no numbered key is set.

use tux_types::credential::Credential;

/// Prefix of the numbered credential variables.
pub const KEY_PREFIX: &str = "GROQ_API_KEY";

/// Highest numbered credential slot.
pub const MAX_KEYS: usize = 9;

/// Load credentials from the process environment.
pub fn load_credentials() -> Vec<Credential> {
    credentials_from(|key| match std::env::var(key) {
        Ok(val) => Some(val),
        // Present but not valid Unicode -- unusable as a bearer token.
        Err(std::env::VarError::NotUnicode(_)) => None,
        Err(std::env::VarError::NotPresent) => None,
    })
}

/// Collect credentials from an arbitrary variable lookup, skipping blanks.
pub fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> Vec<Credential> {
    let numbered: Vec<Credential> = (1..=MAX_KEYS)
        .filter_map(|i| lookup(format!("{KEY_PREFIX}_{i}").as_str()))
        .map(|v| Credential::new(v.trim()))
        .filter(|c| !c.is_blank())
        .collect();

    if !numbered.is_empty() {
        tracing::debug!(count = numbered.len(), "Loaded numbered API keys");
        return numbered;
    }

    lookup(KEY_PREFIX)
        .map(|v| Credential::new(v.trim()))
        .filter(|c| !c.is_blank())
        .into_iter()
        .collect()
}
