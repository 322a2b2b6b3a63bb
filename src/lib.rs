// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod community;
pub mod config;
pub mod error;
pub mod metrics;
pub mod reports;
pub mod state;
pub mod store;
pub mod telemetry;

// `crate_root::api::router` and `crate_root::router` both work.
pub use crate::api::router;
pub use crate::state::AppState;

use axum::Router;
use tracing::info;

/// Full application: API routes over env-configured state plus `/metrics`.
pub async fn app() -> anyhow::Result<Router> {
    let state = AppState::from_env()?;
    let metrics = metrics::Metrics::init(state.analytics.recent_window)?;
    info!(
        store = state.reports.name(),
        keyword_limit = state.analytics.keyword_limit,
        spike_threshold = state.analytics.spike_threshold,
        recent_window = state.analytics.recent_window,
        "crime report analyzer ready"
    );
    Ok(router(state).merge(metrics.router()))
}
