// src/analyze/mod.rs
//! Report-text analytics: builds the weekly summary and the per-dimension
//! spike analysis from a batch of report records.
//!
//! Both entry points are pure. Every intermediate (keyword counts, entity
//! lists, category aggregates) is built fresh per call and dropped with it.

pub mod aggregate;
pub mod keywords;
pub mod ner;
pub mod spikes;
pub mod summary;
pub mod tokenize;

use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::reports::ReportRecord;

// Re-export convenient types.
pub use crate::analyze::aggregate::{count_by, most_common, CategoryCount, Dimension, UNKNOWN_LABEL};
pub use crate::analyze::keywords::extract_keywords;
pub use crate::analyze::ner::{extract_entities, EntityBundle};
pub use crate::analyze::spikes::detect_spikes;
pub use crate::analyze::summary::{compose_summary, SummaryInputs, NO_DATA_SUMMARY};

/// Response of the weekly summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPayload {
    pub summary: String,
    pub keywords: Vec<String>,
    pub entities: EntityBundle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpikeAlerts {
    pub area_spikes: Vec<String>,
    pub type_spikes: Vec<String>,
}

/// Response of the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub area_counts: Vec<CategoryCount>,
    pub type_counts: Vec<CategoryCount>,
    pub alerts: SpikeAlerts,
}

/// Non-empty descriptions joined by a single space.
pub fn combined_text(records: &[ReportRecord]) -> String {
    records
        .iter()
        .filter_map(|r| r.description.as_deref())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Weekly summary over `records` (expected newest first, already windowed).
pub fn summarize(records: &[ReportRecord], cfg: &AnalyticsConfig) -> SummaryPayload {
    let text = combined_text(records);
    let keywords = extract_keywords(&text, cfg.keyword_limit);
    let entities = extract_entities(&text);

    let type_counts = count_by(records, Dimension::Type);
    let location_counts = count_by(records, Dimension::Location);
    let top_type = most_common(&type_counts);
    let top_location = most_common(&location_counts);

    // Summary-scoped spike checks: mean over categories with a real value only.
    let known_types = aggregate::count_known(records, Dimension::Type);
    let known_locations = aggregate::count_known(records, Dimension::Location);
    let type_spike = top_type
        .is_some_and(|t| spikes::top_is_spike(t.count, &known_types, cfg.spike_threshold));
    let location_spike = top_location
        .is_some_and(|l| spikes::top_is_spike(l.count, &known_locations, cfg.spike_threshold));

    let summary = compose_summary(&SummaryInputs {
        total_reports: records.len(),
        top_type,
        top_location,
        type_spike,
        location_spike,
        keywords: &keywords,
        entities: &entities,
        entity_preview: cfg.entity_preview,
    });

    SummaryPayload {
        summary,
        keywords,
        entities,
    }
}

/// Per-location and per-type counts with spike alerts for each dimension.
pub fn analyze_counts(records: &[ReportRecord], cfg: &AnalyticsConfig) -> AnalysisPayload {
    let area_counts = count_by(records, Dimension::Location);
    let type_counts = count_by(records, Dimension::Type);
    let alerts = SpikeAlerts {
        area_spikes: detect_spikes(&area_counts, cfg.spike_threshold),
        type_spikes: detect_spikes(&type_counts, cfg.spike_threshold),
    };
    AnalysisPayload {
        area_counts,
        type_counts,
        alerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(desc: Option<&str>, kind: &str, location: Option<&str>) -> ReportRecord {
        ReportRecord {
            description: desc.map(str::to_string),
            kind: Some(kind.to_string()),
            location: location.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn combined_text_skips_missing_and_empty() {
        let rs = vec![
            rec(Some("first"), "A", None),
            rec(None, "A", None),
            rec(Some(""), "A", None),
            rec(Some("second"), "A", None),
        ];
        assert_eq!(combined_text(&rs), "first second");
    }

    #[test]
    fn summary_flags_dominant_type() {
        let mut rs = vec![rec(Some("bike stolen"), "THEFT", Some("Main St")); 6];
        rs.push(rec(Some("graffiti"), "VANDALISM", Some("Oak Ave")));
        rs.push(rec(Some("fight"), "ASSAULT", Some("Oak Ave")));
        let out = summarize(&rs, &AnalyticsConfig::default());
        // types: 6/1/1 → mean 2.67, cutoff 5.33
        assert!(out
            .summary
            .contains("- Alert: 'THEFT' reports are significantly higher than average."));
        // locations: 6/2 → mean 4, cutoff 8 → no location spike
        assert!(out
            .summary
            .contains("- Area with highest activity: 'Main St' (6 reports)."));
        assert_eq!(out.keywords, vec!["bike", "stolen", "graffiti", "fight"]);
    }

    #[test]
    fn analysis_groups_unknown_locations() {
        let rs = vec![
            rec(None, "EMERGENCY", None),
            rec(None, "EMERGENCY", Some("Park")),
            rec(None, "NON_EMERGENCY", None),
        ];
        let out = analyze_counts(&rs, &AnalyticsConfig::default());
        assert_eq!(out.area_counts[0].label, UNKNOWN_LABEL);
        assert_eq!(out.area_counts[0].count, 2);
        assert_eq!(out.type_counts.len(), 2);
        assert!(out.alerts.area_spikes.is_empty());
        assert!(out.alerts.type_spikes.is_empty());
    }

    #[test]
    fn payload_wire_names() {
        let out = analyze_counts(&[], &AnalyticsConfig::default());
        let v = serde_json::to_value(&out).unwrap();
        assert!(v.get("areaCounts").is_some());
        assert!(v.get("typeCounts").is_some());
        assert!(v["alerts"].get("areaSpikes").is_some());
        assert!(v["alerts"].get("typeSpikes").is_some());
    }
}
