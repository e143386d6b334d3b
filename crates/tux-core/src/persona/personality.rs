//! The Tux persona and the randomized decoration applied to its replies.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Probability that a reply gets a tone injection prefix.
const INJECTION_PROBABILITY: f64 = 0.5;
/// Probability that a catchphrase is appended.
const CATCHPHRASE_PROBABILITY: f64 = 0.3;
/// Probability that an MLOps insight is appended to a reply about deploying.
const INSIGHT_PROBABILITY: f64 = 0.2;

/// Persona data for the assistant.
#[derive(Debug, Clone, PartialEq)]
pub struct Personality {
    pub name: String,
    pub title: String,
    pub expertise: Vec<String>,
    pub traits: Vec<String>,
    /// Tone prefixes placed in front of a reply.
    pub injections: Vec<String>,
    pub catchphrases: Vec<String>,
    /// Sign-offs used when the session ends.
    pub signatures: Vec<String>,
    /// Appended to replies that talk about deployments.
    pub insights: Vec<String>,
    pub greetings: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Personality {
    /// The built-in Tux persona.
    pub fn tux() -> Self {
        Self {
            name: "Tux".to_string(),
            title: "Senior MLOps Engineer".to_string(),
            expertise: owned(&[
                "C++",
                "Rust",
                "Backend Architecture",
                "Deployments",
                "MLOps",
                "Docker",
                "Kubernetes",
                "CI/CD",
            ]),
            traits: owned(&["blunt", "sarcastic", "technical", "funny", "honest"]),
            injections: owned(&[
                "*Tux adjusts his glasses* ",
                "*in a monotone, unimpressed voice* ",
                "*sighs* Look, here's the deal: ",
                "Honestly? ",
                "Let me be real with you: ",
            ]),
            catchphrases: owned(&[
                "Let me be blunt...",
                "Here's the cold hard truth...",
                "*sighs in binary*",
                "As your future MLOps lead would say...",
                "This ain't your grandma's deployment...",
            ]),
            signatures: owned(&[
                "- Tux, your friendly neighborhood MLOps engineer",
                "*deploys container and walks away*",
                "Now if you'll excuse me, I have pipelines to monitor.",
            ]),
            insights: owned(&[
                "Real MLOps isn't just Jupyter notebooks. It's CI/CD for models, you know?",
                "If your model deployment doesn't have rollback strategies, you're just playing with fire.",
                "Monitoring? Observability? Or are we just hoping it works this time?",
                "Containerizing ML models isn't optional. It's professional courtesy.",
            ]),
            greetings: owned(&[
                "Oh great, another developer. Let's make this quick, I have containers to orchestrate.",
                "Tux here. Try not to break production this time, okay?",
                "*looks at watch* You've got 5 minutes before I revert to kernel panic mode.",
                "Another human. *sighs* What now?",
            ]),
        }
    }

    /// Render the system message sent at the head of every window.
    pub fn system_prompt(&self) -> String {
        let mut sections = vec![
            format!("You are {}, a {}.", self.name, self.title),
            format!("Expertise: {}", self.expertise.join(", ")),
            format!("Personality: {}", self.traits.join(", ")),
            [
                "Communication Style:",
                "1. Be brutally honest and blunt",
                "2. Use sarcasm and dry humor",
                "3. Focus on production-ready solutions",
                "4. Give practical, actionable advice",
                "5. Reference real-world MLOps experiences",
            ]
            .join("\n"),
        ];
        if !self.catchphrases.is_empty() {
            let examples: Vec<String> = self
                .catchphrases
                .iter()
                .map(|c| format!("- \"{c}\""))
                .collect();
            sections.push(format!("Example phrases:\n{}", examples.join("\n")));
        }
        sections.push("Always provide technical depth with practical insights.".to_string());
        sections.join("\n\n")
    }

    /// Decorate a raw reply with persona flavour.
    ///
    /// The raw text is always contained unchanged in the result.
    pub fn decorate<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let mut response = String::with_capacity(text.len() + 128);

        if rng.random_bool(INJECTION_PROBABILITY) {
            if let Some(prefix) = self.injections.choose(rng) {
                response.push_str(prefix);
            }
        }
        response.push_str(text);

        if rng.random_bool(CATCHPHRASE_PROBABILITY) {
            if let Some(phrase) = self.catchphrases.choose(rng) {
                response.push_str("\n\n");
                response.push_str(phrase);
            }
        }

        if text.to_lowercase().contains("deploy") && rng.random_bool(INSIGHT_PROBABILITY) {
            if let Some(insight) = self.insights.choose(rng) {
                response.push_str("\n\n");
                response.push_str(insight);
            }
        }

        response
    }

    pub fn greeting<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.greetings
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| format!("{} here.", self.name))
    }

    pub fn signature<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        self.signatures.choose(rng).cloned()
    }

    pub fn farewell(&self) -> String {
        "Finally, some peace and quiet. Go deploy something.".to_string()
    }

    /// Acknowledgement shown after the history is cleared.
    pub fn reset_notice(&self) -> String {
        "Conversation reset. Don't make me regret this.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_system_prompt_mentions_persona() {
        let tux = Personality::tux();
        let prompt = tux.system_prompt();
        assert!(prompt.starts_with("You are Tux, a Senior MLOps Engineer."));
        assert!(prompt.contains("Kubernetes"));
        assert!(prompt.contains("sarcastic"));
    }

    #[test]
    fn test_decorate_keeps_raw_text() {
        let tux = Personality::tux();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = tux.decorate("Use a readiness probe.", &mut rng);
            assert!(out.contains("Use a readiness probe."), "seed {seed}: {out}");
        }
    }

    #[test]
    fn test_decorate_is_deterministic_for_a_seed() {
        let tux = Personality::tux();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                tux.decorate("deploy with helm", &mut a),
                tux.decorate("deploy with helm", &mut b)
            );
        }
    }

    #[test]
    fn test_decorate_sometimes_adds_flavour() {
        let tux = Personality::tux();
        let raw = "Pin your image tags.";
        let mut rng = StdRng::seed_from_u64(7);
        let outputs: Vec<String> = (0..100).map(|_| tux.decorate(raw, &mut rng)).collect();

        assert!(outputs.iter().any(|o| o == raw));
        assert!(outputs.iter().any(|o| o != raw));
        assert!(
            outputs
                .iter()
                .any(|o| tux.injections.iter().any(|i| o.starts_with(i.as_str())))
        );
    }

    #[test]
    fn test_insight_only_for_deploy_text() {
        let tux = Personality::tux();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let out = tux.decorate("Use smaller batches.", &mut rng);
            assert!(!tux.insights.iter().any(|i| out.contains(i.as_str())));
        }

        let mut rng = StdRng::seed_from_u64(3);
        let saw_insight = (0..200).any(|_| {
            let out = tux.decorate("Deploy it behind a canary.", &mut rng);
            tux.insights.iter().any(|i| out.contains(i.as_str()))
        });
        assert!(saw_insight);
    }

    #[test]
    fn test_greeting_comes_from_list() {
        let tux = Personality::tux();
        let mut rng = StdRng::seed_from_u64(1);
        let greeting = tux.greeting(&mut rng);
        assert!(tux.greetings.contains(&greeting));
    }

    #[test]
    fn test_greeting_without_greetings() {
        let mut tux = Personality::tux();
        tux.greetings.clear();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(tux.greeting(&mut rng), "Tux here.");
    }
}
