//! Model evaluation: the scoring seam and the out-of-process trigger.
//!
//! `Evaluator` is the integration point for a real scoring engine; the
//! current implementation is synthetic. The dashboard never evaluates
//! in-process — `EvaluationTrigger` spawns the crate's own `evaluate`
//! subcommand so a crashing evaluator cannot take the server down with it.

mod synthetic;
mod trigger;

pub use synthetic::SyntheticEvaluator;
pub use trigger::EvaluationTrigger;

use crate::model::{Domain, Metrics, ModelFormat};
use anyhow::Result;
use std::path::Path;

/// Computes the metric block for one model artifact.
///
/// Implementations must populate exactly the metric columns of the given
/// domain (see `Domain::quality_columns` plus latency/throughput) and stay
/// a pure function of the inputs as far as callers can observe, so a real
/// scoring routine can replace the synthetic one without touching callers.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, artifact: &Path, domain: Domain, format: ModelFormat) -> Result<Metrics>;
}
