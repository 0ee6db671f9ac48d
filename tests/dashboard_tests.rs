// Tests for dashboard view shaping: one series per metric column keyed by
// model name, plus the explicit empty state for untouched domains.

use anyhow::Result;
use chrono::Utc;
use modelbench::{
    domain_view, DashboardView, Domain, FsResultStore, Metrics, ModelFormat, ResultRecord,
    ResultStore,
};
use tempfile::TempDir;

fn stt_record(model_name: &str, wer: f64, latency_ms: u64) -> ResultRecord {
    ResultRecord {
        model_name: model_name.to_string(),
        model_format: ModelFormat::from_file_name(model_name),
        dataset: "sample-dataset".to_string(),
        metrics: Metrics::Stt {
            wer,
            cer: 0.05,
            latency_ms,
            throughput_rps: 10.0,
        },
        timestamp: Utc::now(),
    }
}

#[test]
fn test_populated_view_has_quality_and_performance_series() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FsResultStore::new(temp_dir.path());

    store.put(&stt_record("asr_v1.bin", 0.20, 150))?;
    store.put(&stt_record("asr_v2.onnx", 0.10, 90))?;

    let view = match domain_view(&store, Domain::Stt)? {
        DashboardView::Populated(view) => view,
        DashboardView::Empty { .. } => panic!("expected a populated view"),
    };

    assert_eq!(view.domain, "STT");
    assert_eq!(view.models, vec!["asr_v1.bin", "asr_v2.onnx"]);

    let metrics: Vec<&str> = view.quality.iter().map(|s| s.metric.as_str()).collect();
    assert_eq!(metrics, vec!["WER", "CER"]);

    let perf: Vec<&str> = view.performance.iter().map(|s| s.metric.as_str()).collect();
    assert_eq!(perf, vec!["Latency(ms)", "Throughput(req/s)"]);

    // Bars are keyed by model name, in stable (sorted) order
    let wer = &view.quality[0];
    assert_eq!(wer.bars.len(), 2);
    assert_eq!(wer.bars[0].model, "asr_v1.bin");
    assert_eq!(wer.bars[0].value, 0.20);
    assert_eq!(wer.bars[1].model, "asr_v2.onnx");
    assert_eq!(wer.bars[1].value, 0.10);

    let latency = &view.performance[0];
    assert_eq!(latency.bars[0].value, 150.0);
    assert_eq!(latency.bars[1].value, 90.0);

    Ok(())
}

#[test]
fn test_empty_domain_produces_the_empty_state_not_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FsResultStore::new(temp_dir.path());

    // Populate only STT; Authentication stays untouched (no directory at all)
    store.put(&stt_record("asr_v2.onnx", 0.10, 90))?;

    match domain_view(&store, Domain::Auth)? {
        DashboardView::Empty { domain, message } => {
            assert_eq!(domain, "Authentication");
            assert!(message.contains("No Authentication results yet"));
        }
        DashboardView::Populated(_) => panic!("expected the empty state"),
    }

    Ok(())
}

#[test]
fn test_auth_view_has_single_quality_column() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FsResultStore::new(temp_dir.path());

    store.put(&ResultRecord {
        model_name: "voice_auth.bin".to_string(),
        model_format: ModelFormat::NativeBinary,
        dataset: "sample-dataset".to_string(),
        metrics: Metrics::Auth {
            eer: 0.03,
            latency_ms: 70,
            throughput_rps: 15.0,
        },
        timestamp: Utc::now(),
    })?;

    let view = match domain_view(&store, Domain::Auth)? {
        DashboardView::Populated(view) => view,
        DashboardView::Empty { .. } => panic!("expected a populated view"),
    };

    assert_eq!(view.quality.len(), 1);
    assert_eq!(view.quality[0].metric, "EER");
    assert_eq!(view.quality[0].bars[0].value, 0.03);

    Ok(())
}

#[test]
fn test_view_serializes_with_status_tag() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = FsResultStore::new(temp_dir.path());

    let empty = serde_json::to_value(domain_view(&store, Domain::Nlu)?)?;
    assert_eq!(empty["status"], "empty");

    store.put(&stt_record("asr_v2.onnx", 0.10, 90))?;
    let populated = serde_json::to_value(domain_view(&store, Domain::Stt)?)?;
    assert_eq!(populated["status"], "populated");
    assert_eq!(populated["models"][0], "asr_v2.onnx");

    Ok(())
}
