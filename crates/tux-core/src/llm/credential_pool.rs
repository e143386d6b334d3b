//! Ordered credential pool with a rotating active index.

use tux_types::credential::Credential;
use tux_types::error::ConfigError;

/// Ordered, non-empty sequence of upstream API keys.
///
/// Exactly one credential is active at a time. `rotate` advances the active
/// index cyclically, so after `len()` rotations the original key is active
/// again. The pool is cloned per service rather than shared.
#[derive(Debug, Clone)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
    active: usize,
}

impl CredentialPool {
    /// Build a pool from credentials in priority order.
    ///
    /// Blank entries are dropped. Returns `ConfigError::NoCredentials` when
    /// nothing usable remains.
    pub fn new(credentials: Vec<Credential>) -> Result<Self, ConfigError> {
        let credentials: Vec<Credential> =
            credentials.into_iter().filter(|c| !c.is_blank()).collect();
        if credentials.is_empty() {
            return Err(ConfigError::NoCredentials);
        }
        Ok(Self {
            credentials,
            active: 0,
        })
    }

    /// The currently active credential.
    pub fn current(&self) -> &Credential {
        &self.credentials[self.active]
    }

    /// Advance to the next credential, wrapping after the last one.
    ///
    /// Returns the new active index. A single-key pool stays on index 0.
    pub fn rotate(&mut self) -> usize {
        self.active = (self.active + 1) % self.credentials.len();
        self.active
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Always false: construction rejects empty pools.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}
