//! Report domain types: the persisted report, its enums, the create/update
//! request bodies and the lightweight record view consumed by analytics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Fields a new report must carry, in the order they are reported back.
pub const REQUIRED_REPORT_FIELDS: [&str; 4] = ["reportId", "type", "title", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Emergency,
    NonEmergency,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Emergency, ReportType::NonEmergency];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Emergency => "EMERGENCY",
            ReportType::NonEmergency => "NON_EMERGENCY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Dismissed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::InProgress => "IN_PROGRESS",
            ReportStatus::Resolved => "RESOLVED",
            ReportStatus::Dismissed => "DISMISSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// A submitted incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    /// Public tracking id handed to the (anonymous) reporter.
    pub report_id: String,
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Project onto the analytics input view.
    pub fn to_record(&self) -> ReportRecord {
        ReportRecord {
            description: Some(self.description.clone()),
            kind: Some(self.kind.as_str().to_string()),
            location: self.location.clone(),
            created_at: Some(self.created_at),
        }
    }
}

/// Analytics input: free-text description plus categorical fields.
/// Every field is optional; missing values are tolerated downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// POST body for a new report. Everything is optional at the wire level so that
/// validation can name all missing fields at once. `type` and the coordinates
/// stay loosely typed: a non-string type is echoed back as `received`, and
/// coordinates may arrive as numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub report_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub image: Option<String>,
}

/// Alternate create body: a [`NewReport`] plus an optional initial status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReportWithStatus {
    #[serde(flatten)]
    pub report: NewReport,
    #[serde(default)]
    pub status: Option<String>,
}

/// Why a [`NewReport`] was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportValidation {
    MissingFields(Vec<&'static str>),
    InvalidType(Value),
    InvalidCoordinate { field: &'static str, received: Value },
}

fn blank(v: &Option<String>) -> bool {
    v.as_deref().map_or(true, |s| s.is_empty())
}

fn blank_value(v: &Option<Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Number, numeric string, or nothing. Empty strings and `null` mean "not given".
fn coordinate(field: &'static str, raw: Option<Value>) -> Result<Option<f64>, ReportValidation> {
    let invalid = |received: Value| ReportValidation::InvalidCoordinate { field, received };
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => Ok(Some(v)),
            None => Err(invalid(Value::Number(n))),
        },
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(invalid(Value::String(s))),
        },
        Some(other) => Err(invalid(other)),
    }
}

impl NewReport {
    /// Validate and build a `PENDING` report stamped with `now`.
    pub fn into_report(self, now: DateTime<Utc>) -> Result<Report, ReportValidation> {
        let checks = [
            blank(&self.report_id),
            blank_value(&self.kind),
            blank(&self.title),
            blank(&self.description),
        ];
        let missing: Vec<&'static str> = REQUIRED_REPORT_FIELDS
            .iter()
            .zip(checks)
            .filter(|(_, is_blank)| *is_blank)
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ReportValidation::MissingFields(missing));
        }

        let raw_kind = self.kind.unwrap_or(Value::Null);
        let kind = raw_kind
            .as_str()
            .and_then(ReportType::parse)
            .ok_or_else(|| ReportValidation::InvalidType(raw_kind.clone()))?;

        let latitude = coordinate("latitude", self.latitude)?;
        let longitude = coordinate("longitude", self.longitude)?;

        Ok(Report {
            id: Uuid::new_v4(),
            report_id: self.report_id.unwrap_or_default(),
            kind,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location: self.location.filter(|s| !s.is_empty()),
            latitude,
            longitude,
            image: self.image.filter(|s| !s.is_empty()),
            status: ReportStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

/// PATCH body for a status change.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}
