//! Crime report service: binary entrypoint.
//! Boots the Axum HTTP server with report intake, analytics and community routes.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // Picks up ANALYTICS_CONFIG_PATH / ANALYTICS_SPIKE_THRESHOLD / RESOURCES_PATH
    // and the REPORTS_DEV_LOG / REPORTS_LOG_FORMAT switches.
    let _ = dotenvy::dotenv();

    if let Some(format) = crime_report_analyzer::telemetry::init_dev_tracing() {
        tracing::debug!(?format, "dev console logging enabled");
    }

    let router = crime_report_analyzer::app().await?;
    Ok(router.into())
}
