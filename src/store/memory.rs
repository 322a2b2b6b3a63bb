//! In-memory report store.

use chrono::Utc;
use std::sync::RwLock;

use super::{ReportStore, StoreError, StoreResult};
use crate::reports::{Report, ReportStatus};

/// Reports kept in insertion order behind a `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    inner: RwLock<Vec<Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store (tests, demos).
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            inner: RwLock::new(reports),
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("report store lock poisoned".to_string())
    }

    fn newest_first(&self) -> StoreResult<Vec<Report>> {
        let guard = self.inner.read().map_err(|_| Self::poisoned())?;
        let mut out = guard.clone();
        // stable: equal timestamps keep reverse insertion order
        out.reverse();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}

#[async_trait::async_trait]
impl ReportStore for MemoryReportStore {
    async fn insert_report(&self, report: Report) -> StoreResult<Report> {
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        if guard.iter().any(|r| r.report_id == report.report_id) {
            return Err(StoreError::DuplicateReportId(report.report_id));
        }
        guard.push(report.clone());
        Ok(report)
    }

    async fn list_reports(&self) -> StoreResult<Vec<Report>> {
        self.newest_first()
    }

    async fn recent_reports(&self, limit: usize) -> StoreResult<Vec<Report>> {
        let mut out = self.newest_first()?;
        out.truncate(limit);
        Ok(out)
    }

    async fn find_report(&self, report_id: &str) -> StoreResult<Option<Report>> {
        let guard = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(guard.iter().find(|r| r.report_id == report_id).cloned())
    }

    async fn update_status(&self, report_id: &str, status: ReportStatus) -> StoreResult<Report> {
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        let report = guard
            .iter_mut()
            .find(|r| r.report_id == report_id)
            .ok_or(StoreError::NotFound("report"))?;
        report.status = status;
        report.updated_at = Utc::now();
        Ok(report.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
