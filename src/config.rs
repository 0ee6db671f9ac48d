use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub audio: AudioConfig,
    pub evaluation: EvaluationConfig,
    pub nlu: NluConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Root directory holding one result directory per domain (stt/nlu/auth)
    pub results_path: String,
    /// Directory holding transcription text files and the latest pointer
    pub transcripts_path: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Target sample rate for normalized audio (STT engines expect 16kHz)
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Deserialize)]
pub struct EvaluationConfig {
    /// Dataset label stamped into every result record
    pub dataset: String,
}

#[derive(Debug, Deserialize)]
pub struct NluConfig {
    /// Label set the intent classifier chooses from
    pub intent_labels: Vec<String>,
}

impl Config {
    /// Load configuration from an optional file merged over built-in
    /// defaults, so the binary runs without any config file present.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "modelbench")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 8600)?
            .set_default("storage.results_path", "results")?
            .set_default("storage.transcripts_path", "results/transcripts")?
            .set_default("audio.sample_rate", 16000)?
            .set_default("audio.channels", 1)?
            .set_default("evaluation.dataset", "sample-dataset")?
            .set_default(
                "nlu.intent_labels",
                vec![
                    "transfer".to_string(),
                    "account_inquiry".to_string(),
                    "balance_check".to_string(),
                    "payment".to_string(),
                ],
            )?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
