//! Weekly summary + spike analysis endpoints. Both recompute from the store on
//! every call; a failing fetch becomes a generic 500 with no partial payload.

use axum::{extract::State, routing::get, Json, Router};
use std::time::Instant;
use tracing::debug;

use crate::analyze::{self, AnalysisPayload, Dimension, SummaryPayload};
use crate::error::ApiError;
use crate::metrics;
use crate::reports::{Report, ReportRecord};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reports/ai-summary", get(ai_summary))
        .route("/api/reports/analysis", get(analysis))
}

fn to_records(reports: &[Report]) -> Vec<ReportRecord> {
    reports.iter().map(Report::to_record).collect()
}

async fn ai_summary(State(state): State<AppState>) -> Result<Json<SummaryPayload>, ApiError> {
    let started = Instant::now();
    let reports = state
        .reports
        .recent_reports(state.analytics.recent_window)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to generate summary"))?;

    let payload = analyze::summarize(&to_records(&reports), &state.analytics);

    metrics::record_summary();
    debug!(
        reports = reports.len(),
        keywords = payload.keywords.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "weekly summary computed"
    );
    Ok(Json(payload))
}

async fn analysis(State(state): State<AppState>) -> Result<Json<AnalysisPayload>, ApiError> {
    let reports = state
        .reports
        .list_reports()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to load analysis"))?;

    let payload = analyze::analyze_counts(&to_records(&reports), &state.analytics);

    metrics::record_analysis();
    metrics::record_spikes(Dimension::Location, payload.alerts.area_spikes.len());
    metrics::record_spikes(Dimension::Type, payload.alerts.type_spikes.len());
    debug!(
        reports = reports.len(),
        area_spikes = ?payload.alerts.area_spikes,
        type_spikes = ?payload.alerts.type_spikes,
        "spike analysis computed"
    );
    Ok(Json(payload))
}
