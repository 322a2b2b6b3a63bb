// src/config/analytics.rs
//! Tuning knobs for the report analytics.
//!
//! Resolution order:
//! 1) `$ANALYTICS_CONFIG_PATH` (must exist)
//! 2) `config/analytics.toml` (optional)
//! 3) built-in defaults
//!
//! `$ANALYTICS_SPIKE_THRESHOLD` overrides the spike threshold from any source.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analyze::keywords::DEFAULT_KEYWORD_LIMIT;
use crate::analyze::spikes::DEFAULT_SPIKE_THRESHOLD;
use crate::analyze::summary::DEFAULT_ENTITY_PREVIEW;

pub const DEFAULT_ANALYTICS_CONFIG_PATH: &str = "config/analytics.toml";
pub const ENV_ANALYTICS_CONFIG_PATH: &str = "ANALYTICS_CONFIG_PATH";
pub const ENV_SPIKE_THRESHOLD: &str = "ANALYTICS_SPIKE_THRESHOLD";

/// Number of most recent reports the weekly summary looks at.
pub const DEFAULT_RECENT_WINDOW: usize = 50;

fn default_keyword_limit() -> usize {
    DEFAULT_KEYWORD_LIMIT
}
fn default_spike_threshold() -> f64 {
    DEFAULT_SPIKE_THRESHOLD
}
fn default_recent_window() -> usize {
    DEFAULT_RECENT_WINDOW
}
fn default_entity_preview() -> usize {
    DEFAULT_ENTITY_PREVIEW
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Keywords kept in the summary payload.
    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: usize,
    /// Spike when `count >= spike_threshold * mean`.
    #[serde(default = "default_spike_threshold")]
    pub spike_threshold: f64,
    /// Most-recent-N window for the weekly summary.
    #[serde(default = "default_recent_window")]
    pub recent_window: usize,
    /// Entities shown per category in the summary text.
    #[serde(default = "default_entity_preview")]
    pub entity_preview: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            spike_threshold: DEFAULT_SPIKE_THRESHOLD,
            recent_window: DEFAULT_RECENT_WINDOW,
            entity_preview: DEFAULT_ENTITY_PREVIEW,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    analytics: Option<AnalyticsConfig>,
}

// parse optional positive float env
fn parse_threshold_env(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}

impl AnalyticsConfig {
    /// Parse a TOML document with an `[analytics]` table. Missing table → defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s).context("parsing analytics TOML")?;
        Ok(file.analytics.unwrap_or_default().sanitized())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analytics config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks (see module docs).
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_ANALYTICS_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_ANALYTICS_CONFIG_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            Self::load_from(&pb)?
        } else {
            let pb = PathBuf::from(DEFAULT_ANALYTICS_CONFIG_PATH);
            if pb.exists() {
                Self::load_from(&pb)?
            } else {
                Self::default()
            }
        };

        if let Some(t) = parse_threshold_env(std::env::var(ENV_SPIKE_THRESHOLD).ok()) {
            cfg.spike_threshold = t;
        }

        info!(
            keyword_limit = cfg.keyword_limit,
            spike_threshold = cfg.spike_threshold,
            recent_window = cfg.recent_window,
            "analytics config loaded"
        );
        Ok(cfg)
    }

    /// Replace nonsensical values with defaults.
    fn sanitized(mut self) -> Self {
        if !self.spike_threshold.is_finite() || self.spike_threshold <= 0.0 {
            warn!(value = self.spike_threshold, "invalid spike_threshold, using default");
            self.spike_threshold = DEFAULT_SPIKE_THRESHOLD;
        }
        if self.recent_window == 0 {
            warn!("recent_window = 0, using default");
            self.recent_window = DEFAULT_RECENT_WINDOW;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn partial_table_fills_defaults() {
        let cfg = AnalyticsConfig::from_toml_str("[analytics]\nkeyword_limit = 8\n").unwrap();
        assert_eq!(cfg.keyword_limit, 8);
        assert_eq!(cfg.spike_threshold, DEFAULT_SPIKE_THRESHOLD);
        assert_eq!(cfg.recent_window, DEFAULT_RECENT_WINDOW);
        assert_eq!(cfg.entity_preview, DEFAULT_ENTITY_PREVIEW);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            AnalyticsConfig::from_toml_str("").unwrap(),
            AnalyticsConfig::default()
        );
    }

    #[test]
    fn bad_values_are_sanitized() {
        let cfg = AnalyticsConfig::from_toml_str(
            "[analytics]\nspike_threshold = -1.0\nrecent_window = 0\n",
        )
        .unwrap();
        assert_eq!(cfg.spike_threshold, DEFAULT_SPIKE_THRESHOLD);
        assert_eq!(cfg.recent_window, DEFAULT_RECENT_WINDOW);
    }

    #[test]
    fn threshold_env_parsing() {
        assert_eq!(parse_threshold_env(Some(" 3.5 ".into())), Some(3.5));
        assert_eq!(parse_threshold_env(Some("0".into())), None);
        assert_eq!(parse_threshold_env(Some("abc".into())), None);
        assert_eq!(parse_threshold_env(None), None);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD so the repo's config/ does not interfere
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_ANALYTICS_CONFIG_PATH);
        env::remove_var(ENV_SPIKE_THRESHOLD);

        // No files → defaults
        assert_eq!(
            AnalyticsConfig::load_default().unwrap(),
            AnalyticsConfig::default()
        );

        // Env path wins, threshold env overrides it
        let p = tmp.path().join("custom.toml");
        fs::write(&p, "[analytics]\nspike_threshold = 4.0\nrecent_window = 10\n").unwrap();
        env::set_var(ENV_ANALYTICS_CONFIG_PATH, p.display().to_string());
        let cfg = AnalyticsConfig::load_default().unwrap();
        assert_eq!(cfg.spike_threshold, 4.0);
        assert_eq!(cfg.recent_window, 10);

        env::set_var(ENV_SPIKE_THRESHOLD, "1.5");
        assert_eq!(AnalyticsConfig::load_default().unwrap().spike_threshold, 1.5);
        env::remove_var(ENV_SPIKE_THRESHOLD);

        // Dangling env path is an error
        env::set_var(ENV_ANALYTICS_CONFIG_PATH, tmp.path().join("missing.toml"));
        assert!(AnalyticsConfig::load_default().is_err());
        env::remove_var(ENV_ANALYTICS_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }
}
