//! Tux's personality: system prompt, greetings and response decoration.
//!
//! The decoration is random by nature, so every random choice goes through
//! an explicit `rand::Rng` handed in by the caller. `SeededPersonality`
//! owns a `StdRng` so a fixed seed gives reproducible output.

pub mod personality;
pub mod transform;

pub use personality::Personality;
pub use transform::{PlainText, ResponseTransform, SeededPersonality};
