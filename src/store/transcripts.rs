use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::sanitize_file_stem;

const LATEST_POINTER_FILE: &str = "latest.json";

/// One stored transcription: the extracted utterance for one audio upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub file_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Single-slot pointer to the most recent transcript, updated on every put
#[derive(Debug, Serialize, Deserialize)]
struct LatestPointer {
    file_name: String,
    created_at: DateTime<Utc>,
}

/// Plain-text transcript storage: one `.txt` per processed audio upload,
/// plus an explicit `latest.json` pointer so "the most recent transcription"
/// is a recorded fact rather than a file-timestamp scan.
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store the transcript text under `<stem>.txt` and advance the latest
    /// pointer. Same-stem writes overwrite.
    pub fn put(&self, stem: &str, text: &str) -> Result<TranscriptRecord> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create transcript directory {}", self.dir.display())
        })?;

        let file_name = format!("{}.txt", sanitize_file_stem(stem));
        let path = self.dir.join(&file_name);
        fs::write(&path, text)
            .with_context(|| format!("Failed to write transcript {}", path.display()))?;

        let record = TranscriptRecord {
            file_name,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.update_latest(&record)?;

        debug!("Stored transcript: {}", path.display());

        Ok(record)
    }

    /// The most recent transcript, or `Ok(None)` when nothing has been
    /// transcribed yet. Resolves through the pointer file; falls back to a
    /// modified-time scan for directories written before the pointer existed.
    pub fn latest(&self) -> Result<Option<TranscriptRecord>> {
        match self.read_pointer()? {
            Some(pointer) => {
                let path = self.dir.join(&pointer.file_name);
                match fs::read_to_string(&path) {
                    Ok(text) => Ok(Some(TranscriptRecord {
                        file_name: pointer.file_name,
                        text,
                        created_at: pointer.created_at,
                    })),
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        warn!(
                            "Latest pointer references missing transcript {}, rescanning",
                            path.display()
                        );
                        self.scan_latest()
                    }
                    Err(e) => Err(e).with_context(|| {
                        format!("Failed to read transcript {}", path.display())
                    }),
                }
            }
            None => self.scan_latest(),
        }
    }

    fn read_pointer(&self) -> Result<Option<LatestPointer>> {
        let path = self.dir.join(LATEST_POINTER_FILE);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        match serde_json::from_str(&json) {
            Ok(pointer) => Ok(Some(pointer)),
            Err(e) => {
                warn!("Ignoring corrupt latest pointer {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    // Write-then-rename keeps the pointer whole even if we die mid-write
    fn update_latest(&self, record: &TranscriptRecord) -> Result<()> {
        let pointer = LatestPointer {
            file_name: record.file_name.clone(),
            created_at: record.created_at,
        };

        let tmp = self.dir.join(format!("{}.tmp", LATEST_POINTER_FILE));
        let json = serde_json::to_string_pretty(&pointer)
            .context("Failed to serialize latest pointer")?;
        fs::write(&tmp, json)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, self.dir.join(LATEST_POINTER_FILE))
            .context("Failed to replace latest pointer")?;

        Ok(())
    }

    fn scan_latest(&self) -> Result<Option<TranscriptRecord>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read transcript directory {}", self.dir.display())
                })
            }
        };

        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("Failed to read entry in {}", self.dir.display())
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .with_context(|| format!("Failed to stat {}", path.display()))?;
            if newest.as_ref().map(|(t, _)| modified > *t).unwrap_or(true) {
                newest = Some((modified, path));
            }
        }

        match newest {
            Some((modified, path)) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read transcript {}", path.display()))?;
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string();
                Ok(Some(TranscriptRecord {
                    file_name,
                    text,
                    created_at: DateTime::<Utc>::from(modified),
                }))
            }
            None => Ok(None),
        }
    }
}
