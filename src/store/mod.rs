//! Persistence for evaluation results and transcripts.
//!
//! Results are durable, human-inspectable JSON files partitioned per domain:
//! one file per evaluated model under `<results root>/<domain>/`. The
//! `ResultStore` trait is the seam between the rest of the system and the
//! storage representation; `FsResultStore` is the filesystem adapter.

mod fs;
mod transcripts;

pub use fs::FsResultStore;
pub use transcripts::{TranscriptRecord, TranscriptStore};

use crate::model::{Domain, ResultRecord};
use anyhow::Result;
use std::path::PathBuf;

/// Domain-partitioned key-value storage for evaluation records.
///
/// The record's metric block determines its domain, so a record can never
/// be written into the wrong partition.
pub trait ResultStore: Send + Sync {
    /// Persist a record, overwriting any previous record with the same
    /// model name in the same domain. Returns the written path.
    fn put(&self, record: &ResultRecord) -> Result<PathBuf>;

    /// Look up a single record by model name. `Ok(None)` when absent.
    fn get(&self, domain: Domain, model_name: &str) -> Result<Option<ResultRecord>>;

    /// Load every readable record in a domain. Missing directories yield an
    /// empty list; malformed files are skipped, never abort the listing.
    fn list(&self, domain: Domain) -> Result<Vec<ResultRecord>>;
}

/// Replace every non-alphanumeric character with `_`, producing a stable
/// file stem from an arbitrary upload name (e.g. `asr_v2.onnx` → `asr_v2_onnx`).
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
