use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use tracing::debug;

/// Maps an utterance to an intent label. Kept as a trait so a real NLU
/// model can replace the stub without touching callers.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, utterance: &str) -> Result<String>;
}

/// Placeholder classifier: picks a random label from a fixed set,
/// ignoring the utterance. UI-level convenience only; its output is never
/// written to the result store.
pub struct StubIntentClassifier {
    labels: Vec<String>,
}

impl StubIntentClassifier {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl IntentClassifier for StubIntentClassifier {
    fn classify(&self, utterance: &str) -> Result<String> {
        let label = self
            .labels
            .choose(&mut rand::thread_rng())
            .context("No intent labels configured")?
            .clone();

        debug!("Classified {:?} as {:?}", utterance, label);

        Ok(label)
    }
}
