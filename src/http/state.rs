use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::eval::EvaluationTrigger;
use crate::intent::{IntentClassifier, StubIntentClassifier};
use crate::store::{FsResultStore, ResultStore, TranscriptStore};
use crate::transcribe::{StubTranscriber, TranscriptionTrigger};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub results: Arc<dyn ResultStore>,
    pub transcripts: Arc<TranscriptStore>,
    pub evaluation: Arc<EvaluationTrigger>,
    pub transcription: Arc<TranscriptionTrigger>,
    pub intents: Arc<dyn IntentClassifier>,
}

impl AppState {
    /// Wire the stores, triggers, and stub implementations from config.
    /// `config_source` is forwarded to the evaluation worker so parent and
    /// child resolve the same result directories.
    pub fn new(config: &Config, config_source: &str) -> Result<Self> {
        let results: Arc<dyn ResultStore> =
            Arc::new(FsResultStore::new(&config.storage.results_path));
        let transcripts = Arc::new(TranscriptStore::new(&config.storage.transcripts_path));

        let evaluation = Arc::new(EvaluationTrigger::from_current_exe(config_source)?);
        let transcription = Arc::new(TranscriptionTrigger::new(
            Box::new(StubTranscriber::default()),
            TranscriptStore::new(&config.storage.transcripts_path),
            config.audio.sample_rate,
        ));
        let intents: Arc<dyn IntentClassifier> = Arc::new(StubIntentClassifier::new(
            config.nlu.intent_labels.clone(),
        ));

        Ok(Self {
            results,
            transcripts,
            evaluation,
            transcription,
            intents,
        })
    }
}
