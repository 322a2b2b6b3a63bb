use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

use super::{anon_hash, ApiJson};
use crate::community::{
    AttendanceInput, CommunityMeeting, ContactInput, ContactValidation, Feedback, FeedbackInput,
    MeetingInput, MeetingValidation, Resource,
};
use crate::error::ApiError;
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/community-meetings", get(list_meetings).post(create_meeting))
        .route(
            "/api/community-meetings/{id}",
            put(update_meeting)
                .delete(delete_meeting)
                .post(submit_feedback),
        )
        .route(
            "/api/community-meetings/{id}/feedback",
            get(list_feedback).post(create_feedback),
        )
        .route(
            "/api/community-meetings-attendance",
            get(attendance).post(record_attendance),
        )
        .route("/api/contact", post(contact))
        .route("/api/resources", get(resources))
}

fn meeting_error(err: MeetingValidation) -> ApiError {
    match err {
        MeetingValidation::MissingFields => ApiError::bad_request("Missing fields"),
        MeetingValidation::InvalidTime(raw) => {
            ApiError::bad_request("Invalid meeting time").with("received", raw)
        }
    }
}

/// Unparseable ids cannot match any meeting.
fn meeting_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Meeting not found".to_string()))
}

async fn list_meetings(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommunityMeeting>>, ApiError> {
    state
        .community
        .meetings()
        .map(Json)
        .map_err(|e| ApiError::from_store(e, "Failed to fetch meetings"))
}

async fn create_meeting(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<MeetingInput>,
) -> Result<(StatusCode, Json<CommunityMeeting>), ApiError> {
    let fields = body.validate().map_err(meeting_error)?;
    let meeting = state
        .community
        .create_meeting(fields)
        .map_err(|e| ApiError::from_store(e, "Failed to create meeting"))?;
    info!(meeting = %meeting.id, "meeting scheduled");
    Ok((StatusCode::CREATED, Json(meeting)))
}

async fn update_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<MeetingInput>,
) -> Result<Json<CommunityMeeting>, ApiError> {
    let fields = body.validate().map_err(meeting_error)?;
    let id = meeting_id(&id)?;
    state
        .community
        .update_meeting(id, fields)
        .map(Json)
        .map_err(|e| ApiError::from_store(e, "Failed to update meeting"))
}

async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = meeting_id(&id)?;
    state
        .community
        .delete_meeting(id)
        .map_err(|e| ApiError::from_store(e, "Failed to delete meeting"))?;
    info!(meeting = %id, "meeting deleted");
    Ok(Json(json!({ "success": true })))
}

async fn list_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Feedback>>, ApiError> {
    let id = meeting_id(&id)?;
    state
        .community
        .feedback_for(id)
        .map(Json)
        .map_err(|e| ApiError::from_store(e, "Failed to fetch feedback"))
}

fn store_feedback(state: &AppState, raw_id: &str, body: FeedbackInput) -> Result<Feedback, ApiError> {
    let rating = body
        .rating()
        .ok_or_else(|| ApiError::bad_request("Rating must be 1-5"))?;
    let id = meeting_id(raw_id)?;
    let fb = state
        .community
        .add_feedback(id, rating, body.comment)
        .map_err(|e| ApiError::from_store(e, "Failed to submit feedback"))?;
    info!(meeting = %id, rating, "feedback submitted");
    Ok(fb)
}

async fn create_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<FeedbackInput>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    let fb = store_feedback(&state, &id, body)?;
    Ok((StatusCode::CREATED, Json(fb)))
}

/// Feedback posted straight to the meeting URL (what the meetings page does); 200.
async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<FeedbackInput>,
) -> Result<Json<Feedback>, ApiError> {
    Ok(Json(store_feedback(&state, &id, body)?))
}

async fn attendance(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, u64>>, ApiError> {
    state
        .community
        .attendance()
        .map(Json)
        .map_err(|e| ApiError::from_store(e, "Failed to fetch attendance"))
}

async fn record_attendance(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AttendanceInput>,
) -> Result<Response, ApiError> {
    let Some(meeting_id) = body.meeting_id.filter(|m| !m.is_empty()) else {
        return Ok((StatusCode::BAD_REQUEST, Json(json!({ "success": false }))).into_response());
    };
    let count = state
        .community
        .record_attendance(&meeting_id)
        .map_err(|e| ApiError::from_store(e, "Failed to record attendance"))?;
    Ok(Json(json!({ "success": true, "count": count })).into_response())
}

async fn contact(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ContactInput>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let msg = body.into_message(Utc::now()).map_err(|e| match e {
        ContactValidation::MissingFields => ApiError::bad_request("All fields are required"),
        ContactValidation::InvalidEmail => ApiError::bad_request("Invalid email format"),
    })?;
    let saved = state
        .community
        .save_contact(msg)
        .map_err(|e| ApiError::from_store(e, "Failed to process contact message"))?;
    info!(
        id = %saved.id,
        sender = %anon_hash(&saved.email),
        subject_len = saved.subject.len(),
        "contact message received"
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Contact message received successfully" })),
    ))
}

async fn resources(State(state): State<AppState>) -> Json<Vec<Resource>> {
    Json(state.community.resources())
}
