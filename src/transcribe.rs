//! Audio upload → normalized WAV → transcript text.
//!
//! The transcriber itself is a stub; the trigger around it is the real
//! contract: normalize the upload to mono 16kHz, extract text, store it in
//! the transcript directory, and remove both temporary files on every exit
//! path. One-shot, no retry.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

use crate::audio::{pcm, AudioFile};
use crate::store::{TranscriptRecord, TranscriptStore};

/// Turns normalized PCM into text. The seam for a real STT engine
/// (whisper.cpp, sherpa, ...); callers only see this trait.
pub trait SpeechTranscriber: Send + Sync {
    fn transcribe(&self, samples: &[i16], sample_rate: u32) -> Result<String>;
}

/// Placeholder transcriber that returns a fixed banking utterance so the
/// NLU intent-test path can be exercised before a real engine is wired in.
pub struct StubTranscriber {
    utterance: String,
}

impl StubTranscriber {
    pub fn new(utterance: impl Into<String>) -> Self {
        Self {
            utterance: utterance.into(),
        }
    }
}

impl Default for StubTranscriber {
    fn default() -> Self {
        Self::new("send money to my savings account")
    }
}

impl SpeechTranscriber for StubTranscriber {
    fn transcribe(&self, _samples: &[i16], _sample_rate: u32) -> Result<String> {
        Ok(self.utterance.clone())
    }
}

/// One-shot transcription pipeline for an uploaded audio file
pub struct TranscriptionTrigger {
    transcriber: Box<dyn SpeechTranscriber>,
    store: TranscriptStore,
    target_sample_rate: u32,
}

impl TranscriptionTrigger {
    pub fn new(
        transcriber: Box<dyn SpeechTranscriber>,
        store: TranscriptStore,
        target_sample_rate: u32,
    ) -> Self {
        Self {
            transcriber,
            store,
            target_sample_rate,
        }
    }

    /// Process one uploaded audio file and store its transcript.
    /// Decode failures are surfaced; temp files are removed regardless.
    pub fn run(&self, audio: &[u8], original_name: &str) -> Result<TranscriptRecord> {
        let stem = Path::new(original_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(original_name)
            .to_string();

        let suffix = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let id = Uuid::new_v4();
        let src_path = std::env::temp_dir().join(format!("modelbench-audio-{}{}", id, suffix));
        let wav_path = std::env::temp_dir().join(format!("modelbench-audio-{}.wav", id));

        fs::write(&src_path, audio).with_context(|| {
            format!("Failed to write temporary audio file {}", src_path.display())
        })?;

        info!("Transcribing {} ({} bytes)", original_name, audio.len());

        let result = self.process(&src_path, &wav_path, &stem);

        // Uploaded and normalized audio are transient: remove on every path
        remove_temp(&src_path);
        remove_temp(&wav_path);

        result
    }

    fn process(&self, src: &Path, wav: &Path, stem: &str) -> Result<TranscriptRecord> {
        let audio = AudioFile::open(src)?;
        let samples = audio.to_mono(self.target_sample_rate);

        // Keep the normalized waveform on disk while transcribing: that is
        // the artifact a real STT engine consumes.
        pcm::write_wav(wav, &samples, self.target_sample_rate)?;

        let text = self
            .transcriber
            .transcribe(&samples, self.target_sample_rate)
            .context("Transcription failed")?;

        let record = self.store.put(stem, &text)?;
        info!("Transcript stored: {}", record.file_name);

        Ok(record)
    }
}

fn remove_temp(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove temporary file {}: {}", path.display(), e);
        }
    }
}
