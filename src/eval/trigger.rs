use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, warn};
use uuid::Uuid;

use crate::model::{Domain, ModelFormat};

/// Out-of-process evaluation boundary.
///
/// Writes the uploaded artifact to a temporary file, spawns the evaluation
/// worker (by default this binary's own `evaluate` subcommand), and blocks
/// until it exits. The worker writes exactly one result file via the store;
/// the only signal read back here is its exit status, which is surfaced to
/// the caller rather than swallowed. The temporary artifact is removed
/// whether or not the worker succeeded.
pub struct EvaluationTrigger {
    worker: PathBuf,
    config_source: String,
}

impl EvaluationTrigger {
    pub fn new(worker: impl Into<PathBuf>, config_source: impl Into<String>) -> Self {
        Self {
            worker: worker.into(),
            config_source: config_source.into(),
        }
    }

    /// Use the currently running binary as the worker
    pub fn from_current_exe(config_source: impl Into<String>) -> Result<Self> {
        let exe = std::env::current_exe().context("Failed to resolve current executable")?;
        Ok(Self::new(exe, config_source))
    }

    /// Evaluate one uploaded artifact. Blocks until the worker exits.
    pub async fn run(
        &self,
        artifact: &[u8],
        original_name: &str,
        domain: Domain,
    ) -> Result<ModelFormat> {
        let format = ModelFormat::from_file_name(original_name);

        let suffix = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let tmp_path = std::env::temp_dir()
            .join(format!("modelbench-upload-{}{}", Uuid::new_v4(), suffix));

        fs::write(&tmp_path, artifact).with_context(|| {
            format!("Failed to write temporary artifact {}", tmp_path.display())
        })?;

        info!(
            "Evaluating {} ({} / {}) via worker {}",
            original_name,
            domain,
            format,
            self.worker.display()
        );

        let status = Command::new(&self.worker)
            .arg("--config")
            .arg(&self.config_source)
            .arg("evaluate")
            .arg("--model-path")
            .arg(&tmp_path)
            .arg("--model-type")
            .arg(domain.dir_name())
            .arg("--model-format")
            .arg(format.as_str())
            .arg("--original-name")
            .arg(original_name)
            .status()
            .await;

        // The artifact is transient: clean it up on every path
        if let Err(e) = fs::remove_file(&tmp_path) {
            warn!(
                "Failed to remove temporary artifact {}: {}",
                tmp_path.display(),
                e
            );
        }

        let status = status.context("Failed to launch evaluation worker")?;
        if !status.success() {
            anyhow::bail!("Evaluation worker exited with {}", status);
        }

        info!("Evaluation of {} complete", original_name);

        Ok(format)
    }
}
