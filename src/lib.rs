pub mod audio;
pub mod config;
pub mod dashboard;
pub mod eval;
pub mod http;
pub mod intent;
pub mod model;
pub mod store;
pub mod transcribe;

pub use config::Config;
pub use dashboard::{domain_view, Bar, DashboardView, DomainView, MetricSeries};
pub use eval::{EvaluationTrigger, Evaluator, SyntheticEvaluator};
pub use http::{create_router, AppState};
pub use intent::{IntentClassifier, StubIntentClassifier};
pub use model::{Domain, Metrics, ModelFormat, ResultRecord};
pub use store::{FsResultStore, ResultStore, TranscriptRecord, TranscriptStore};
pub use transcribe::{SpeechTranscriber, StubTranscriber, TranscriptionTrigger};
