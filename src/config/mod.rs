// src/config/mod.rs
//! Runtime configuration: analytics tuning (TOML) and the resource catalog (JSON).

pub mod analytics;
pub mod resources;

pub use analytics::AnalyticsConfig;
pub use resources::load_resources_default;
