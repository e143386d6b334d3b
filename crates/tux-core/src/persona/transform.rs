//! Post-processing applied to raw assistant text before display.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tux_types::error::{CompletionFailure, FailureKind};

use super::personality::Personality;

/// Turns raw model output into display text.
///
/// History always keeps the raw text; only the display copy is transformed.
pub trait ResponseTransform: Send + Sync {
    fn transform(&mut self, raw: &str) -> String;

    /// User-visible notice for a failed turn. Never empty.
    fn failure_notice(&self, failure: &CompletionFailure) -> String {
        match failure.kind {
            FailureKind::RetriesExhausted => {
                format!("The assistant is unavailable right now: {}", failure.last_message)
            }
            FailureKind::Configuration => {
                format!("The assistant is misconfigured: {}", failure.last_message)
            }
        }
    }
}

/// Identity transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl ResponseTransform for PlainText {
    fn transform(&mut self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Persona decoration driven by an owned, seedable rng.
#[derive(Debug, Clone)]
pub struct SeededPersonality {
    personality: Personality,
    rng: StdRng,
}

impl SeededPersonality {
    /// `Some(seed)` gives reproducible decoration; `None` seeds from the OS.
    pub fn new(personality: Personality, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { personality, rng }
    }

    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    pub fn greeting(&mut self) -> String {
        self.personality.greeting(&mut self.rng)
    }

    /// Farewell line followed by a random signature.
    pub fn farewell(&mut self) -> String {
        let farewell = self.personality.farewell();
        match self.personality.signature(&mut self.rng) {
            Some(signature) => format!("{farewell}\n\n{signature}"),
            None => farewell,
        }
    }
}

impl ResponseTransform for SeededPersonality {
    fn transform(&mut self, raw: &str) -> String {
        self.personality.decorate(raw, &mut self.rng)
    }

    fn failure_notice(&self, failure: &CompletionFailure) -> String {
        match failure.kind {
            FailureKind::RetriesExhausted => format!(
                "*{} facepalms* Every API key I tried failed. Last error: {}. Check your keys and try again.",
                self.personality.name, failure.last_message
            ),
            FailureKind::Configuration => format!(
                "Even I'm speechless. My configuration is broken: {}",
                failure.last_message
            ),
        }
    }
}
