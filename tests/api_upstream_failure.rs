// tests/api_upstream_failure.rs
//
// A report store that always fails: analytics endpoints must answer with a
// generic 500 and no partial payload.

use async_trait::async_trait;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use crime_report_analyzer::api;
use crime_report_analyzer::config::AnalyticsConfig;
use crime_report_analyzer::reports::{Report, ReportStatus};
use crime_report_analyzer::state::AppState;
use crime_report_analyzer::store::{CommunityStore, ReportStore, StoreError, StoreResult};

struct DownStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".to_string()))
}

#[async_trait]
impl ReportStore for DownStore {
    async fn insert_report(&self, _report: Report) -> StoreResult<Report> {
        down()
    }
    async fn list_reports(&self) -> StoreResult<Vec<Report>> {
        down()
    }
    async fn recent_reports(&self, _limit: usize) -> StoreResult<Vec<Report>> {
        down()
    }
    async fn find_report(&self, _report_id: &str) -> StoreResult<Option<Report>> {
        down()
    }
    async fn update_status(&self, _report_id: &str, _status: ReportStatus) -> StoreResult<Report> {
        down()
    }
    fn name(&self) -> &'static str {
        "down"
    }
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let state = AppState::new(
        Arc::new(DownStore),
        Arc::new(CommunityStore::default()),
        AnalyticsConfig::default(),
    );
    let resp = api::router(state)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn summary_fetch_failure_is_generic_500() {
    let (status, v) = get_json("/api/reports/ai-summary").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v, serde_json::json!({ "error": "Failed to generate summary" }));
}

#[tokio::test]
async fn analysis_fetch_failure_is_generic_500() {
    let (status, v) = get_json("/api/reports/analysis").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v, serde_json::json!({ "error": "Failed to load analysis" }));
}

#[tokio::test]
async fn listing_failure_hides_store_detail() {
    let (status, v) = get_json("/api/reports").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let msg = v["error"].as_str().unwrap_or_default();
    assert!(!msg.contains("connection refused"), "leaked detail: {msg}");
}
