use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Model category tracked by the dashboard. Each domain has its own metric
/// schema and its own directory under the results root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Stt,
    Nlu,
    Auth,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Stt, Domain::Nlu, Domain::Auth];

    /// Directory name for this domain under the results root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Domain::Stt => "stt",
            Domain::Nlu => "nlu",
            Domain::Auth => "auth",
        }
    }

    /// Human-readable label used in views and log lines
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Stt => "STT",
            Domain::Nlu => "NLU",
            Domain::Auth => "Authentication",
        }
    }

    /// Quality metric columns for this domain, in display order.
    /// Latency and throughput are common to all domains and live in the
    /// performance pair instead.
    pub fn quality_columns(&self) -> &'static [&'static str] {
        match self {
            Domain::Stt => &["WER", "CER"],
            Domain::Nlu => &["Accuracy", "F1"],
            Domain::Auth => &["EER"],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stt" => Ok(Domain::Stt),
            "nlu" => Ok(Domain::Nlu),
            "auth" | "authentication" => Ok(Domain::Auth),
            other => anyhow::bail!("unknown model domain: {}", other),
        }
    }
}

/// Model artifact format, derived from the uploaded file's extension.
/// Unrecognized extensions map to `Unknown` rather than being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFormat {
    NativeBinary,
    Onnx,
    Gguf,
    Unknown,
}

impl ModelFormat {
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("bin") => ModelFormat::NativeBinary,
            Some("onnx") => ModelFormat::Onnx,
            Some("gguf") => ModelFormat::Gguf,
            _ => ModelFormat::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFormat::NativeBinary => "native-binary",
            ModelFormat::Onnx => "onnx",
            ModelFormat::Gguf => "gguf",
            ModelFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native-binary" => Ok(ModelFormat::NativeBinary),
            "onnx" => Ok(ModelFormat::Onnx),
            "gguf" => Ok(ModelFormat::Gguf),
            "unknown" => Ok(ModelFormat::Unknown),
            other => anyhow::bail!("unknown model format: {}", other),
        }
    }
}

/// Domain-specific metric block of a result record.
///
/// The JSON keys are the stable column names the dashboard indexes on, so
/// bulk loaders can build a column-oriented view straight from the mapping.
/// The variant determines the record's domain; untagged (de)serialization
/// distinguishes variants by their unique quality keys (WER/CER vs
/// Accuracy/F1 vs EER).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metrics {
    Stt {
        #[serde(rename = "WER")]
        wer: f64,
        #[serde(rename = "CER")]
        cer: f64,
        #[serde(rename = "Latency(ms)")]
        latency_ms: u64,
        #[serde(rename = "Throughput(req/s)")]
        throughput_rps: f64,
    },
    Nlu {
        #[serde(rename = "Accuracy")]
        accuracy: f64,
        #[serde(rename = "F1")]
        f1: f64,
        #[serde(rename = "Latency(ms)")]
        latency_ms: u64,
        #[serde(rename = "Throughput(req/s)")]
        throughput_rps: f64,
    },
    Auth {
        #[serde(rename = "EER")]
        eer: f64,
        #[serde(rename = "Latency(ms)")]
        latency_ms: u64,
        #[serde(rename = "Throughput(req/s)")]
        throughput_rps: f64,
    },
}

impl Metrics {
    /// The domain this metric block belongs to
    pub fn domain(&self) -> Domain {
        match self {
            Metrics::Stt { .. } => Domain::Stt,
            Metrics::Nlu { .. } => Domain::Nlu,
            Metrics::Auth { .. } => Domain::Auth,
        }
    }

    pub fn latency_ms(&self) -> u64 {
        match self {
            Metrics::Stt { latency_ms, .. }
            | Metrics::Nlu { latency_ms, .. }
            | Metrics::Auth { latency_ms, .. } => *latency_ms,
        }
    }

    pub fn throughput_rps(&self) -> f64 {
        match self {
            Metrics::Stt { throughput_rps, .. }
            | Metrics::Nlu { throughput_rps, .. }
            | Metrics::Auth { throughput_rps, .. } => *throughput_rps,
        }
    }

    /// All metric columns as (column name, value) pairs, in display order
    pub fn columns(&self) -> Vec<(&'static str, f64)> {
        match self {
            Metrics::Stt {
                wer,
                cer,
                latency_ms,
                throughput_rps,
            } => vec![
                ("WER", *wer),
                ("CER", *cer),
                ("Latency(ms)", *latency_ms as f64),
                ("Throughput(req/s)", *throughput_rps),
            ],
            Metrics::Nlu {
                accuracy,
                f1,
                latency_ms,
                throughput_rps,
            } => vec![
                ("Accuracy", *accuracy),
                ("F1", *f1),
                ("Latency(ms)", *latency_ms as f64),
                ("Throughput(req/s)", *throughput_rps),
            ],
            Metrics::Auth {
                eer,
                latency_ms,
                throughput_rps,
            } => vec![
                ("EER", *eer),
                ("Latency(ms)", *latency_ms as f64),
                ("Throughput(req/s)", *throughput_rps),
            ],
        }
    }

    /// Look up a single metric column by its stable name
    pub fn value(&self, column: &str) -> Option<f64> {
        self.columns()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}

/// One persisted evaluation outcome for one model within one domain.
///
/// `model_name` is the original uploaded file name and acts as the unique
/// key within the domain; re-evaluating the same name overwrites the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "ModelName")]
    pub model_name: String,

    #[serde(rename = "ModelFormat")]
    pub model_format: ModelFormat,

    #[serde(rename = "Dataset")]
    pub dataset: String,

    #[serde(flatten)]
    pub metrics: Metrics,

    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ResultRecord {
    pub fn domain(&self) -> Domain {
        self.metrics.domain()
    }
}
