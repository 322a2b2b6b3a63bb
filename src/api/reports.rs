use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};

use super::{anon_hash, ApiJson};
use crate::error::ApiError;
use crate::metrics;
use crate::reports::{
    NewReport, NewReportWithStatus, Report, ReportStatus, ReportType, ReportValidation,
    StatusUpdate, REQUIRED_REPORT_FIELDS,
};
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reports", get(list_reports).post(create_report))
        .route("/api/reports/create", post(create_report_with_status))
        .route(
            "/api/reports/{report_id}/details",
            get(report_details).patch(update_status),
        )
}

async fn list_reports(State(state): State<AppState>) -> Result<Json<Vec<Report>>, ApiError> {
    let reports = state
        .reports
        .list_reports()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch reports"))?;
    Ok(Json(reports))
}

fn validation_error(err: ReportValidation) -> ApiError {
    match err {
        ReportValidation::MissingFields(missing) => ApiError::bad_request(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))
        .with("requiredFields", REQUIRED_REPORT_FIELDS.to_vec()),
        ReportValidation::InvalidType(received) => ApiError::bad_request("Invalid report type")
            .with(
                "validTypes",
                ReportType::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
            )
            .with("received", received),
        ReportValidation::InvalidCoordinate { field, received } => {
            ApiError::bad_request(format!("Invalid {field}")).with("received", received)
        }
    }
}

fn status_error(received: &str) -> ApiError {
    ApiError::bad_request("Invalid report status")
        .with(
            "validStatuses",
            ReportStatus::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        )
        .with("received", received)
}

async fn store_new(state: &AppState, report: Report) -> Result<Report, ApiError> {
    let saved = state
        .reports
        .insert_report(report)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to create report"))?;

    metrics::record_report_created();
    info!(
        report = %anon_hash(&saved.report_id),
        kind = saved.kind.as_str(),
        status = saved.status.as_str(),
        has_location = saved.location.is_some(),
        "report created"
    );
    Ok(saved)
}

async fn create_report(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewReport>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let report = body.into_report(Utc::now()).map_err(|e| {
        warn!(reason = ?e, "report rejected");
        validation_error(e)
    })?;
    let saved = store_new(&state, report).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// Alternate intake used by older clients: same validation, optional initial
/// status, answers 200.
async fn create_report_with_status(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewReportWithStatus>,
) -> Result<Json<Report>, ApiError> {
    let status = match body.status.as_deref().filter(|s| !s.is_empty()) {
        None => ReportStatus::Pending,
        Some(raw) => ReportStatus::parse(raw).ok_or_else(|| status_error(raw))?,
    };
    let mut report = body.report.into_report(Utc::now()).map_err(|e| {
        warn!(reason = ?e, "report rejected");
        validation_error(e)
    })?;
    report.status = status;
    Ok(Json(store_new(&state, report).await?))
}

async fn report_details(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    if report_id.trim().is_empty() {
        return Err(ApiError::bad_request("Report ID is required"));
    }
    state
        .reports
        .find_report(&report_id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch report details"))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))
}

async fn update_status(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    ApiJson(body): ApiJson<StatusUpdate>,
) -> Result<Json<Report>, ApiError> {
    let status = ReportStatus::parse(&body.status).ok_or_else(|| status_error(&body.status))?;

    let updated = state
        .reports
        .update_status(&report_id, status)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update report status"))?;

    info!(
        report = %anon_hash(&updated.report_id),
        status = status.as_str(),
        "report status updated"
    );
    Ok(Json(updated))
}
