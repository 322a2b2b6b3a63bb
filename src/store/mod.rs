// src/store/mod.rs
//! Persistence seam. Handlers only see the traits/structs here; the
//! in-memory implementations back the default app and the tests.

pub mod community;
pub mod memory;

use crate::reports::{Report, ReportStatus};

pub use community::CommunityStore;
pub use memory::MemoryReportStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("report id `{0}` already exists")]
    DuplicateReportId(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert a new report; `report_id` must be unique.
    async fn insert_report(&self, report: Report) -> StoreResult<Report>;

    /// All reports, newest first.
    async fn list_reports(&self) -> StoreResult<Vec<Report>>;

    /// At most `limit` reports, newest first.
    async fn recent_reports(&self, limit: usize) -> StoreResult<Vec<Report>>;

    async fn find_report(&self, report_id: &str) -> StoreResult<Option<Report>>;

    async fn update_status(&self, report_id: &str, status: ReportStatus) -> StoreResult<Report>;

    fn name(&self) -> &'static str;
}
