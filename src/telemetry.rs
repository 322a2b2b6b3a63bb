//! Local log output. Shuttle installs its own subscriber in deployment; this
//! only adds a console subscriber on a developer machine.
//!
//! - `REPORTS_DEV_LOG=1` turns it on, and only in a dev environment (debug
//!   build, or `SHUTTLE_ENV` in local/development/dev).
//! - `REPORTS_LOG_FORMAT=json` switches from compact lines to JSON lines.
//! - `RUST_LOG` overrides the default filter.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "REPORTS_DEV_LOG";
pub const ENV_LOG_FORMAT: &str = "REPORTS_LOG_FORMAT";

const DEFAULT_FILTER: &str = "crime_report_analyzer=debug,tower_http=info,warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn from_env_value(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Console logging is wanted only when the flag is `1` and we run as dev.
pub fn dev_logging_enabled(flag: Option<&str>, shuttle_env: Option<&str>, debug_build: bool) -> bool {
    let dev_env = debug_build
        || matches!(
            shuttle_env.unwrap_or_default().to_ascii_lowercase().as_str(),
            "local" | "development" | "dev"
        );
    flag == Some("1") && dev_env
}

/// Install the console subscriber if enabled. Returns the chosen format, or
/// `None` when nothing was installed (disabled, or a subscriber already exists).
pub fn init_dev_tracing() -> Option<LogFormat> {
    let flag = std::env::var(ENV_DEV_LOG).ok();
    let shuttle_env = std::env::var("SHUTTLE_ENV").ok();
    if !dev_logging_enabled(flag.as_deref(), shuttle_env.as_deref(), cfg!(debug_assertions)) {
        return None;
    }

    let format = LogFormat::from_env_value(std::env::var(ENV_LOG_FORMAT).ok().as_deref());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init(),
    };
    installed.ok().map(|_| format)
}
