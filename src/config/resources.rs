// src/config/resources.rs
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::community::Resource;

pub const DEFAULT_RESOURCES_PATH: &str = "config/resources.json";
const ENV_PATH: &str = "RESOURCES_PATH";

/// Load the resource catalog from a JSON array file.
pub fn load_resources_from(path: &Path) -> Result<Vec<Resource>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading resources from {}", path.display()))?;
    parse_resources(&content)
}

/// Load using env var + fallback:
/// 1) $RESOURCES_PATH
/// 2) config/resources.json
///
/// Neither present → empty catalog.
pub fn load_resources_default() -> Result<Vec<Resource>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_resources_from(&pb);
        } else {
            return Err(anyhow!("RESOURCES_PATH points to non-existent path"));
        }
    }
    let json_p = PathBuf::from(DEFAULT_RESOURCES_PATH);
    if json_p.exists() {
        return load_resources_from(&json_p);
    }
    Ok(Vec::new())
}

fn parse_resources(s: &str) -> Result<Vec<Resource>> {
    let items: Vec<Resource> = serde_json::from_str(s).context("parsing resources JSON")?;
    Ok(items
        .into_iter()
        .filter(|r| !r.title.trim().is_empty() && !r.category.trim().is_empty())
        .collect())
}
