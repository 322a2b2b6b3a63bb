//! HTTP error taxonomy. Every variant renders as `{"error": "..."}` plus
//! optional extra fields, with the matching status code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        extra: Map<String, Value>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// Generic failure; `public` is shown to the client, `source` only logged.
    #[error("{public}: {source}")]
    Internal {
        public: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra JSON field to a `BadRequest`; no-op for other variants.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Self::BadRequest { extra, .. } = &mut self {
            extra.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn internal(public: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            public: public.into(),
            source: source.into(),
        }
    }

    /// Map a store failure, using `public` for anything that is not a
    /// domain outcome (missing row, duplicate id).
    pub fn from_store(err: StoreError, public: &str) -> Self {
        match err {
            StoreError::NotFound(what) => Self::NotFound(not_found_message(what)),
            StoreError::DuplicateReportId(_) => {
                Self::Conflict("Report ID must be unique".to_string())
            }
            other @ StoreError::Unavailable(_) => Self::internal(public, other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn not_found_message(what: &str) -> String {
    let mut chars = what.chars();
    match chars.next() {
        Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
        None => "Not found".to_string(),
    }
}

/// Unreadable or mistyped JSON bodies get the same `{"error": ...}` shape as
/// validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request("Invalid request body").with("detail", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = Map::new();
        match self {
            ApiError::BadRequest { message, extra } => {
                body.insert("error".into(), Value::String(message));
                body.extend(extra);
            }
            ApiError::Internal { public, source } => {
                let detail = format!("{source:#}");
                tracing::error!(error = %detail, "{}", public);
                body.insert("error".into(), Value::String(public));
            }
            ApiError::NotFound(m) | ApiError::Conflict(m) => {
                body.insert("error".into(), Value::String(m));
            }
        }
        (status, Json(Value::Object(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let e = ApiError::from_store(StoreError::NotFound("report"), "x");
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.to_string(), "Report not found");

        let e = ApiError::from_store(StoreError::DuplicateReportId("A".into()), "x");
        assert_eq!(e.status(), StatusCode::CONFLICT);

        let e = ApiError::from_store(StoreError::Unavailable("down".into()), "Failed");
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn extras_only_on_bad_request() {
        let e = ApiError::bad_request("Invalid report type").with("received", "THEFT");
        match e {
            ApiError::BadRequest { extra, .. } => assert_eq!(extra["received"], "THEFT"),
            _ => panic!("expected BadRequest"),
        }
        let e = ApiError::NotFound("x".into()).with("k", 1);
        assert!(matches!(e, ApiError::NotFound(_)));
    }
}
