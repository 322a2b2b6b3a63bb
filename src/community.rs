//! Community-facing records: meetings, meeting feedback, contact messages and
//! the static resource catalog.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityMeeting {
    pub id: Uuid,
    pub title: String,
    pub time: DateTime<Utc>,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Create/update body. `time` is an RFC 3339 timestamp.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeetingInput {
    pub title: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingValidation {
    MissingFields,
    InvalidTime(String),
}

/// Validated meeting fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingFields {
    pub title: String,
    pub time: DateTime<Utc>,
    pub location: String,
}

impl MeetingInput {
    pub fn validate(self) -> Result<MeetingFields, MeetingValidation> {
        let (Some(title), Some(time), Some(location)) = (
            self.title.filter(|s| !s.is_empty()),
            self.time.filter(|s| !s.is_empty()),
            self.location.filter(|s| !s.is_empty()),
        ) else {
            return Err(MeetingValidation::MissingFields);
        };
        let time = DateTime::parse_from_rfc3339(&time)
            .map_err(|_| MeetingValidation::InvalidTime(time.clone()))?
            .with_timezone(&Utc);
        Ok(MeetingFields {
            title,
            time,
            location,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Feedback body. `rating` stays loosely typed so a non-number gets the same
/// 400 as an out-of-range number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackInput {
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FeedbackInput {
    /// Whole-number rating within 1..=5.
    pub fn rating(&self) -> Option<u8> {
        let r = self.rating.as_ref()?.as_f64()?;
        if r.fract() != 0.0 || r < MIN_RATING as f64 || r > MAX_RATING as f64 {
            return None;
        }
        Some(r as u8)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInput {
    pub meeting_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidation {
    MissingFields,
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

impl ContactInput {
    pub fn into_message(self, now: DateTime<Utc>) -> Result<ContactMessage, ContactValidation> {
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            self.name.filter(|s| !s.is_empty()),
            self.email.filter(|s| !s.is_empty()),
            self.subject.filter(|s| !s.is_empty()),
            self.message.filter(|s| !s.is_empty()),
        ) else {
            return Err(ContactValidation::MissingFields);
        };
        if !is_valid_email(&email) {
            return Err(ContactValidation::InvalidEmail);
        }
        Ok(ContactMessage {
            id: Uuid::new_v4(),
            name,
            email,
            subject,
            message,
            created_at: now,
        })
    }
}

/// Safety resource entry (hotlines, guides, support services).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub url: Option<String>,
}
