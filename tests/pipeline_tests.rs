// End-to-end pipeline tests, run in-process through the library types:
// upload → evaluate → store → dashboard, and audio → transcript → intent.

use anyhow::Result;
use chrono::Utc;
use modelbench::{
    domain_view, DashboardView, Domain, Evaluator, FsResultStore, IntentClassifier, ModelFormat,
    ResultRecord, ResultStore, StubIntentClassifier, StubTranscriber, SyntheticEvaluator,
    TranscriptStore, TranscriptionTrigger,
};
use std::f64::consts::PI;
use tempfile::TempDir;

fn evaluate_and_store(
    store: &FsResultStore,
    artifact: &std::path::Path,
    original_name: &str,
    domain: Domain,
) -> Result<ResultRecord> {
    let format = ModelFormat::from_file_name(original_name);
    let metrics = SyntheticEvaluator.evaluate(artifact, domain, format)?;
    let record = ResultRecord {
        model_name: original_name.to_string(),
        model_format: format,
        dataset: "sample-dataset".to_string(),
        metrics,
        timestamp: Utc::now(),
    };
    store.put(&record)?;
    Ok(record)
}

#[test]
fn test_uploaded_model_shows_up_in_the_stt_comparison() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FsResultStore::new(temp_dir.path().join("results"));

    let artifact = temp_dir.path().join("upload.tmp");
    std::fs::write(&artifact, b"opaque model bytes")?;

    evaluate_and_store(&store, &artifact, "asr_v2.onnx", Domain::Stt)?;

    let stored = store
        .get(Domain::Stt, "asr_v2.onnx")?
        .expect("record should exist after evaluation");
    assert_eq!(stored.model_format, ModelFormat::Onnx);
    assert_eq!(stored.domain(), Domain::Stt);

    match domain_view(&store, Domain::Stt)? {
        DashboardView::Populated(view) => {
            assert_eq!(view.models, vec!["asr_v2.onnx"]);
        }
        DashboardView::Empty { .. } => panic!("STT view should list the uploaded model"),
    }

    Ok(())
}

#[test]
fn test_reupload_replaces_the_record_with_a_newer_timestamp() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FsResultStore::new(temp_dir.path().join("results"));

    let artifact = temp_dir.path().join("upload.tmp");
    std::fs::write(&artifact, b"opaque model bytes")?;

    let first = evaluate_and_store(&store, &artifact, "asr_v2.onnx", Domain::Stt)?;
    std::thread::sleep(std::time::Duration::from_millis(10));
    evaluate_and_store(&store, &artifact, "asr_v2.onnx", Domain::Stt)?;

    let listed = store.list(Domain::Stt)?;
    assert_eq!(listed.len(), 1, "re-evaluation must not append a second record");
    assert!(listed[0].timestamp > first.timestamp);

    Ok(())
}

#[test]
fn test_untouched_auth_domain_renders_the_empty_state() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FsResultStore::new(temp_dir.path().join("results"));

    match domain_view(&store, Domain::Auth)? {
        DashboardView::Empty { message, .. } => {
            assert!(message.contains("No Authentication results yet"));
        }
        DashboardView::Populated(_) => panic!("expected the empty state"),
    }

    Ok(())
}

fn sine_wav_bytes(sample_rate: u32, channels: u16, seconds: f64) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        let frames = (sample_rate as f64 * seconds) as usize;
        for i in 0..frames {
            let t = i as f64 / sample_rate as f64;
            let sample = ((t * 440.0 * 2.0 * PI).sin() * 8000.0) as i16;
            for _ in 0..channels {
                writer.write_sample(sample)?;
            }
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

#[test]
fn test_audio_upload_becomes_the_latest_transcript() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let transcripts_dir = temp_dir.path().join("transcripts");

    let store = TranscriptStore::new(&transcripts_dir);
    store.put("old_call", "an earlier utterance")?;

    let trigger = TranscriptionTrigger::new(
        Box::new(StubTranscriber::default()),
        TranscriptStore::new(&transcripts_dir),
        16000,
    );

    let audio = sine_wav_bytes(44100, 2, 0.3)?;
    let record = trigger.run(&audio, "call.wav")?;
    assert_eq!(record.file_name, "call.txt");
    assert!(transcripts_dir.join("call.txt").exists());

    // The fresh upload wins over the pre-existing transcript
    let latest = store.latest()?.expect("latest transcript should exist");
    assert_eq!(latest.file_name, "call.txt");
    assert_eq!(latest.text, record.text);

    Ok(())
}

#[test]
fn test_transcription_failure_leaves_no_transcript() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let transcripts_dir = temp_dir.path().join("transcripts");

    let trigger = TranscriptionTrigger::new(
        Box::new(StubTranscriber::default()),
        TranscriptStore::new(&transcripts_dir),
        16000,
    );

    // Not decodable audio; the decode error must surface
    let result = trigger.run(b"definitely not audio", "broken.mp3");
    assert!(result.is_err());
    assert!(!transcripts_dir.join("broken.txt").exists());

    Ok(())
}

#[test]
fn test_intent_classifier_picks_from_the_configured_labels() -> Result<()> {
    let labels = vec![
        "transfer".to_string(),
        "account_inquiry".to_string(),
        "balance_check".to_string(),
        "payment".to_string(),
    ];
    let classifier = StubIntentClassifier::new(labels.clone());

    for _ in 0..20 {
        let intent = classifier.classify("send money to my savings account")?;
        assert!(labels.contains(&intent), "unexpected label {}", intent);
    }

    let empty = StubIntentClassifier::new(Vec::new());
    assert!(empty.classify("anything").is_err());

    Ok(())
}
