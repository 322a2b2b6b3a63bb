use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::analyze::Dimension;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

/// One-time metrics registration (so series show up on /metrics).
fn describe_all() {
    describe_counter!("reports_created_total", "Reports accepted by POST /api/reports.");
    describe_counter!(
        "analytics_summary_total",
        "Weekly summaries computed (GET /api/reports/ai-summary)."
    );
    describe_counter!(
        "analytics_analysis_total",
        "Spike analyses computed (GET /api/reports/analysis)."
    );
    describe_counter!(
        "analytics_spikes_total",
        "Spike labels flagged, by dimension (type|location)."
    );
    describe_gauge!(
        "analytics_recent_window",
        "Number of recent reports the weekly summary covers."
    );
}

impl Metrics {
    /// Install the Prometheus recorder once per process; later calls reuse it.
    pub fn init(recent_window: usize) -> Result<Self> {
        let handle = HANDLE.get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| anyhow!("prometheus: install recorder: {e}"))?;
            describe_all();
            Ok::<_, anyhow::Error>(handle)
        })?;

        gauge!("analytics_recent_window").set(recent_window as f64);

        Ok(Self {
            handle: handle.clone(),
        })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn record_report_created() {
    counter!("reports_created_total").increment(1);
}

pub fn record_summary() {
    counter!("analytics_summary_total").increment(1);
}

pub fn record_analysis() {
    counter!("analytics_analysis_total").increment(1);
}

pub fn record_spikes(dim: Dimension, n: usize) {
    if n > 0 {
        counter!("analytics_spikes_total", "dimension" => dim.as_str()).increment(n as u64);
    }
}
