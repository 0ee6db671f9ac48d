//! Shapes stored result records into per-domain comparison views.
//!
//! One bar-chart series per quality metric column, plus the joint
//! latency/throughput pair, every series keyed by model name. A domain
//! with no records produces an explicit empty state, never an error.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Domain, ResultRecord};
use crate::store::ResultStore;
use anyhow::Result;

/// One bar in a comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub model: String,
    pub value: f64,
}

/// One chart: a metric column compared across all models in a domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub metric: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainView {
    pub domain: String,
    pub models: Vec<String>,
    /// One series per quality column (WER/CER, Accuracy/F1, or EER)
    pub quality: Vec<MetricSeries>,
    /// The latency/throughput pair, common to every domain
    pub performance: Vec<MetricSeries>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    Populated(DomainView),
    Empty { domain: String, message: String },
}

const PERFORMANCE_COLUMNS: [&str; 2] = ["Latency(ms)", "Throughput(req/s)"];

/// Build the comparison view for one domain from everything in the store
pub fn domain_view(store: &dyn ResultStore, domain: Domain) -> Result<DashboardView> {
    let records = store.list(domain)?;
    if records.is_empty() {
        return Ok(DashboardView::Empty {
            domain: domain.label().to_string(),
            message: format!(
                "No {} results yet. Upload a model to populate this view.",
                domain.label()
            ),
        });
    }

    // BTreeMap both dedupes by model name and gives a stable chart order
    let by_name: BTreeMap<String, ResultRecord> = records
        .into_iter()
        .map(|r| (r.model_name.clone(), r))
        .collect();

    let quality = domain
        .quality_columns()
        .iter()
        .map(|column| series(column, &by_name))
        .collect();
    let performance = PERFORMANCE_COLUMNS
        .iter()
        .map(|column| series(column, &by_name))
        .collect();

    Ok(DashboardView::Populated(DomainView {
        domain: domain.label().to_string(),
        models: by_name.keys().cloned().collect(),
        quality,
        performance,
    }))
}

fn series(column: &str, by_name: &BTreeMap<String, ResultRecord>) -> MetricSeries {
    let bars = by_name
        .iter()
        .filter_map(|(model, record)| {
            record.metrics.value(column).map(|value| Bar {
                model: model.clone(),
                value,
            })
        })
        .collect();

    MetricSeries {
        metric: column.to_string(),
        bars,
    }
}
