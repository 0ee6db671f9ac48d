// Tests for the synthetic evaluator: each domain gets exactly its declared
// metric columns, with every value inside its declared uniform range.

use anyhow::Result;
use modelbench::{Domain, Evaluator, Metrics, ModelFormat, SyntheticEvaluator};
use std::path::Path;

fn columns(metrics: &Metrics) -> Vec<&'static str> {
    metrics.columns().into_iter().map(|(name, _)| name).collect()
}

#[test]
fn test_stt_metrics_have_exactly_the_stt_columns() -> Result<()> {
    let metrics = SyntheticEvaluator.evaluate(
        Path::new("/tmp/asr_v2.onnx"),
        Domain::Stt,
        ModelFormat::Onnx,
    )?;

    assert_eq!(
        columns(&metrics),
        vec!["WER", "CER", "Latency(ms)", "Throughput(req/s)"]
    );
    assert_eq!(metrics.domain(), Domain::Stt);

    Ok(())
}

#[test]
fn test_stt_metrics_stay_in_declared_ranges() -> Result<()> {
    // The draws are random; sample repeatedly to cover the range check
    for _ in 0..50 {
        let metrics = SyntheticEvaluator.evaluate(
            Path::new("/tmp/asr_v2.onnx"),
            Domain::Stt,
            ModelFormat::Onnx,
        )?;

        let wer = metrics.value("WER").unwrap();
        let cer = metrics.value("CER").unwrap();
        assert!((0.05..=0.25).contains(&wer), "WER out of range: {}", wer);
        assert!((0.03..=0.15).contains(&cer), "CER out of range: {}", cer);
        assert!((50..=200).contains(&metrics.latency_ms()));
        assert!((5.0..=15.0).contains(&metrics.throughput_rps()));
    }

    Ok(())
}

#[test]
fn test_nlu_metrics_stay_in_declared_ranges() -> Result<()> {
    for _ in 0..50 {
        let metrics = SyntheticEvaluator.evaluate(
            Path::new("/tmp/intent.gguf"),
            Domain::Nlu,
            ModelFormat::Gguf,
        )?;

        assert_eq!(
            columns(&metrics),
            vec!["Accuracy", "F1", "Latency(ms)", "Throughput(req/s)"]
        );
        let accuracy = metrics.value("Accuracy").unwrap();
        let f1 = metrics.value("F1").unwrap();
        assert!((0.85..=0.95).contains(&accuracy));
        assert!((0.85..=0.95).contains(&f1));
        assert!((50..=200).contains(&metrics.latency_ms()));
        assert!((5.0..=15.0).contains(&metrics.throughput_rps()));
    }

    Ok(())
}

#[test]
fn test_auth_metrics_stay_in_declared_ranges() -> Result<()> {
    for _ in 0..50 {
        let metrics = SyntheticEvaluator.evaluate(
            Path::new("/tmp/voice_auth.bin"),
            Domain::Auth,
            ModelFormat::NativeBinary,
        )?;

        assert_eq!(
            columns(&metrics),
            vec!["EER", "Latency(ms)", "Throughput(req/s)"]
        );
        let eer = metrics.value("EER").unwrap();
        assert!((0.02..=0.06).contains(&eer));
        assert!((50..=150).contains(&metrics.latency_ms()));
        assert!((10.0..=20.0).contains(&metrics.throughput_rps()));
    }

    Ok(())
}

#[test]
fn test_rates_are_rounded_for_display() -> Result<()> {
    for _ in 0..20 {
        let metrics = SyntheticEvaluator.evaluate(
            Path::new("/tmp/asr_v2.onnx"),
            Domain::Stt,
            ModelFormat::Onnx,
        )?;

        let wer = metrics.value("WER").unwrap();
        assert!(((wer * 1000.0).round() - wer * 1000.0).abs() < 1e-9);

        let throughput = metrics.throughput_rps();
        assert!(((throughput * 100.0).round() - throughput * 100.0).abs() < 1e-9);
    }

    Ok(())
}

#[test]
fn test_format_derived_from_extension() {
    assert_eq!(ModelFormat::from_file_name("asr_v2.onnx"), ModelFormat::Onnx);
    assert_eq!(ModelFormat::from_file_name("llm.GGUF"), ModelFormat::Gguf);
    assert_eq!(
        ModelFormat::from_file_name("whisper.bin"),
        ModelFormat::NativeBinary
    );
    // Unsupported extensions are accepted as unknown, not rejected
    assert_eq!(ModelFormat::from_file_name("model.pt"), ModelFormat::Unknown);
    assert_eq!(
        ModelFormat::from_file_name("no_extension"),
        ModelFormat::Unknown
    );
}

#[test]
fn test_domain_parsing_accepts_aliases() {
    assert_eq!("stt".parse::<Domain>().unwrap(), Domain::Stt);
    assert_eq!("STT".parse::<Domain>().unwrap(), Domain::Stt);
    assert_eq!("nlu".parse::<Domain>().unwrap(), Domain::Nlu);
    assert_eq!("auth".parse::<Domain>().unwrap(), Domain::Auth);
    assert_eq!("Authentication".parse::<Domain>().unwrap(), Domain::Auth);
    assert!("vision".parse::<Domain>().is_err());
}
