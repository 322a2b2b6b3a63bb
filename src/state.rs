use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{load_resources_default, AnalyticsConfig};
use crate::store::{CommunityStore, MemoryReportStore, ReportStore};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<dyn ReportStore>,
    pub community: Arc<CommunityStore>,
    pub analytics: Arc<AnalyticsConfig>,
}

impl AppState {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        community: Arc<CommunityStore>,
        analytics: AnalyticsConfig,
    ) -> Self {
        Self {
            reports,
            community,
            analytics: Arc::new(analytics),
        }
    }

    /// Empty in-memory stores with the given analytics config.
    pub fn in_memory(analytics: AnalyticsConfig) -> Self {
        Self::new(
            Arc::new(MemoryReportStore::new()),
            Arc::new(CommunityStore::default()),
            analytics,
        )
    }

    /// In-memory stores, analytics config and resource catalog from env/config files.
    pub fn from_env() -> Result<Self> {
        let analytics = AnalyticsConfig::load_default().context("loading analytics config")?;
        let resources = load_resources_default().context("loading resource catalog")?;
        tracing::info!(resources = resources.len(), "resource catalog loaded");
        Ok(Self::new(
            Arc::new(MemoryReportStore::new()),
            Arc::new(CommunityStore::new(resources)),
            analytics,
        ))
    }
}
