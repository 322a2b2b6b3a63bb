//! In-memory store for meetings, feedback, attendance, contact messages and
//! the resource catalog.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::community::{CommunityMeeting, ContactMessage, Feedback, MeetingFields, Resource};

#[derive(Debug, Default)]
struct Inner {
    meetings: Vec<CommunityMeeting>,
    feedback: Vec<Feedback>,
    attendance: BTreeMap<String, u64>,
    contact: Vec<ContactMessage>,
}

#[derive(Debug, Default)]
pub struct CommunityStore {
    inner: RwLock<Inner>,
    resources: Vec<Resource>,
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("community store lock poisoned".to_string())
}

impl CommunityStore {
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            resources,
        }
    }

    /* ---- meetings ---- */

    /// Meetings ordered by scheduled time, earliest first.
    pub fn meetings(&self) -> StoreResult<Vec<CommunityMeeting>> {
        let g = self.inner.read().map_err(|_| poisoned())?;
        let mut out = g.meetings.clone();
        out.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(out)
    }

    pub fn create_meeting(&self, fields: MeetingFields) -> StoreResult<CommunityMeeting> {
        let meeting = CommunityMeeting {
            id: Uuid::new_v4(),
            title: fields.title,
            time: fields.time,
            location: fields.location,
            created_at: Utc::now(),
        };
        let mut g = self.inner.write().map_err(|_| poisoned())?;
        g.meetings.push(meeting.clone());
        Ok(meeting)
    }

    pub fn update_meeting(&self, id: Uuid, fields: MeetingFields) -> StoreResult<CommunityMeeting> {
        let mut g = self.inner.write().map_err(|_| poisoned())?;
        let m = g
            .meetings
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound("meeting"))?;
        m.title = fields.title;
        m.time = fields.time;
        m.location = fields.location;
        Ok(m.clone())
    }

    /// Removes the meeting together with its feedback.
    pub fn delete_meeting(&self, id: Uuid) -> StoreResult<()> {
        let mut g = self.inner.write().map_err(|_| poisoned())?;
        let before = g.meetings.len();
        g.meetings.retain(|m| m.id != id);
        if g.meetings.len() == before {
            return Err(StoreError::NotFound("meeting"));
        }
        g.feedback.retain(|f| f.meeting_id != id);
        Ok(())
    }

    /* ---- feedback ---- */

    pub fn add_feedback(
        &self,
        meeting_id: Uuid,
        rating: u8,
        comment: Option<String>,
    ) -> StoreResult<Feedback> {
        let mut g = self.inner.write().map_err(|_| poisoned())?;
        if !g.meetings.iter().any(|m| m.id == meeting_id) {
            return Err(StoreError::NotFound("meeting"));
        }
        let fb = Feedback {
            id: Uuid::new_v4(),
            meeting_id,
            rating,
            comment: comment.filter(|c| !c.is_empty()),
            created_at: Utc::now(),
        };
        g.feedback.push(fb.clone());
        Ok(fb)
    }

    /// Feedback for one meeting, newest first.
    pub fn feedback_for(&self, meeting_id: Uuid) -> StoreResult<Vec<Feedback>> {
        let g = self.inner.read().map_err(|_| poisoned())?;
        let mut out: Vec<Feedback> = g
            .feedback
            .iter()
            .filter(|f| f.meeting_id == meeting_id)
            .rev()
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    /* ---- attendance ---- */

    pub fn record_attendance(&self, meeting_id: &str) -> StoreResult<u64> {
        let mut g = self.inner.write().map_err(|_| poisoned())?;
        let n = g.attendance.entry(meeting_id.to_string()).or_insert(0);
        *n += 1;
        Ok(*n)
    }

    pub fn attendance(&self) -> StoreResult<BTreeMap<String, u64>> {
        let g = self.inner.read().map_err(|_| poisoned())?;
        Ok(g.attendance.clone())
    }

    /* ---- contact ---- */

    pub fn save_contact(&self, msg: ContactMessage) -> StoreResult<ContactMessage> {
        let mut g = self.inner.write().map_err(|_| poisoned())?;
        g.contact.push(msg.clone());
        Ok(msg)
    }

    /* ---- resources ---- */

    /// Resource catalog ordered by category (stable within a category).
    pub fn resources(&self) -> Vec<Resource> {
        let mut out = self.resources.clone();
        out.sort_by(|a, b| a.category.cmp(&b.category));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn fields(title: &str, hours: i64) -> MeetingFields {
        MeetingFields {
            title: title.to_string(),
            time: Utc::now() + Duration::hours(hours),
            location: "Library".to_string(),
        }
    }

    #[test]
    fn meetings_sorted_by_time() {
        let s = CommunityStore::default();
        s.create_meeting(fields("later", 48)).unwrap();
        s.create_meeting(fields("sooner", 2)).unwrap();
        let titles: Vec<String> = s.meetings().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["sooner", "later"]);
    }

    #[test]
    fn delete_drops_feedback_and_reports_missing() {
        let s = CommunityStore::default();
        let m = s.create_meeting(fields("m", 1)).unwrap();
        s.add_feedback(m.id, 4, Some("good".into())).unwrap();
        assert_eq!(s.feedback_for(m.id).unwrap().len(), 1);

        s.delete_meeting(m.id).unwrap();
        assert!(s.feedback_for(m.id).unwrap().is_empty());
        assert!(matches!(s.delete_meeting(m.id), Err(StoreError::NotFound(_))));
        assert!(matches!(
            s.add_feedback(m.id, 3, None),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn attendance_counts_per_meeting() {
        let s = CommunityStore::default();
        assert_eq!(s.record_attendance("1").unwrap(), 1);
        assert_eq!(s.record_attendance("1").unwrap(), 2);
        assert_eq!(s.record_attendance("2").unwrap(), 1);
        assert_eq!(s.attendance().unwrap().get("1"), Some(&2));
    }

    #[test]
    fn contact_messages_are_kept() {
        let s = CommunityStore::default();
        let msg = ContactMessage {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@example.org".into(),
            subject: "Lights".into(),
            message: "Street lights out".into(),
            created_at: Utc::now(),
        };
        let saved = s.save_contact(msg.clone()).unwrap();
        assert_eq!(saved, msg);
        assert_eq!(s.inner.read().unwrap().contact, vec![msg]);
    }

    #[test]
    fn resources_by_category() {
        let r = |t: &str, c: &str| Resource {
            title: t.into(),
            description: String::new(),
            category: c.into(),
            url: None,
        };
        let s = CommunityStore::new(vec![r("b", "Wellbeing"), r("a", "Emergency")]);
        let cats: Vec<String> = s.resources().into_iter().map(|r| r.category).collect();
        assert_eq!(cats, vec!["Emergency", "Wellbeing"]);
    }
}
