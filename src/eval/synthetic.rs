use anyhow::Result;
use rand::Rng;
use std::path::Path;
use tracing::debug;

use super::Evaluator;
use crate::model::{Domain, Metrics, ModelFormat};

/// Placeholder evaluator that draws every metric from a fixed uniform range
/// per column instead of running the artifact. Keeps the full upload →
/// evaluate → store → render pipeline exercisable before a real scoring
/// engine exists.
///
/// Declared ranges:
/// - STT:  WER 0.05–0.25, CER 0.03–0.15, latency 50–200ms, throughput 5–15 req/s
/// - NLU:  accuracy 0.85–0.95, F1 0.85–0.95, latency 50–200ms, throughput 5–15 req/s
/// - Auth: EER 0.02–0.06, latency 50–150ms, throughput 10–20 req/s
pub struct SyntheticEvaluator;

impl Evaluator for SyntheticEvaluator {
    fn evaluate(&self, artifact: &Path, domain: Domain, format: ModelFormat) -> Result<Metrics> {
        debug!(
            "Synthetic evaluation of {} ({} / {})",
            artifact.display(),
            domain,
            format
        );

        let mut rng = rand::thread_rng();

        let metrics = match domain {
            Domain::Stt => Metrics::Stt {
                wer: round3(rng.gen_range(0.05..0.25)),
                cer: round3(rng.gen_range(0.03..0.15)),
                latency_ms: rng.gen_range(50..=200),
                throughput_rps: round2(rng.gen_range(5.0..15.0)),
            },
            Domain::Nlu => Metrics::Nlu {
                accuracy: round3(rng.gen_range(0.85..0.95)),
                f1: round3(rng.gen_range(0.85..0.95)),
                latency_ms: rng.gen_range(50..=200),
                throughput_rps: round2(rng.gen_range(5.0..15.0)),
            },
            Domain::Auth => Metrics::Auth {
                eer: round3(rng.gen_range(0.02..0.06)),
                latency_ms: rng.gen_range(50..=150),
                throughput_rps: round2(rng.gen_range(10.0..20.0)),
            },
        };

        Ok(metrics)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
