use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{sanitize_file_stem, ResultStore};
use crate::model::{Domain, ResultRecord};

const RESULT_FILE_SUFFIX: &str = "_result.json";

/// Filesystem-backed result store: one pretty-printed JSON file per model
/// per domain directory. Same-name writes overwrite (last writer wins);
/// there is no secondary index, so `list` scans the directory on each call.
pub struct FsResultStore {
    root: PathBuf,
}

impl FsResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn domain_dir(&self, domain: Domain) -> PathBuf {
        self.root.join(domain.dir_name())
    }

    fn record_path(&self, domain: Domain, model_name: &str) -> PathBuf {
        self.domain_dir(domain)
            .join(format!("{}{}", sanitize_file_stem(model_name), RESULT_FILE_SUFFIX))
    }
}

impl ResultStore for FsResultStore {
    fn put(&self, record: &ResultRecord) -> Result<PathBuf> {
        let domain = record.domain();
        let dir = self.domain_dir(domain);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create result directory {}", dir.display()))?;

        let path = self.record_path(domain, &record.model_name);
        let json = serde_json::to_string_pretty(record)
            .context("Failed to serialize result record")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write result file {}", path.display()))?;

        debug!(
            "Stored {} result for {}: {}",
            domain,
            record.model_name,
            path.display()
        );

        Ok(path)
    }

    fn get(&self, domain: Domain, model_name: &str) -> Result<Option<ResultRecord>> {
        let path = self.record_path(domain, model_name);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read result file {}", path.display()))
            }
        };

        let record = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse result file {}", path.display()))?;

        Ok(Some(record))
    }

    fn list(&self, domain: Domain) -> Result<Vec<ResultRecord>> {
        let dir = self.domain_dir(domain);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            // Missing directory means "no results yet", not an error
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read result directory {}", dir.display()))
            }
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read entry in {}", dir.display()))?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            // Each file parses independently; a bad one must not blank the
            // whole dashboard.
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) => {
                    warn!("Skipping unreadable result file {}: {}", path.display(), e);
                    continue;
                }
            };

            let record: ResultRecord = match serde_json::from_str(&json) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping malformed result file {}: {}", path.display(), e);
                    continue;
                }
            };

            if record.domain() != domain {
                warn!(
                    "Skipping {}: {} record found in the {} directory",
                    path.display(),
                    record.domain(),
                    domain
                );
                continue;
            }

            records.push(record);
        }

        Ok(records)
    }
}
