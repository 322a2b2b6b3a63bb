//! Weekly summary text composed from counts, keywords, entities and spike flags.
//!
//! Section order is fixed; conditional sections are simply skipped. The wording
//! is consumed verbatim by the admin dashboard, so keep it stable.

use super::aggregate::{CategoryCount, UNKNOWN_LABEL};
use super::ner::EntityBundle;

pub const NO_DATA_SUMMARY: &str = "No recent reports to summarize.";

/// Default number of items shown per entity category.
pub const DEFAULT_ENTITY_PREVIEW: usize = 3;

/// Everything the composer needs; computed upstream in [`crate::analyze::summarize`].
#[derive(Debug, Clone)]
pub struct SummaryInputs<'a> {
    pub total_reports: usize,
    pub top_type: Option<&'a CategoryCount>,
    pub top_location: Option<&'a CategoryCount>,
    /// Top type passes the summary-scoped spike check.
    pub type_spike: bool,
    /// Top location passes the summary-scoped spike check.
    pub location_spike: bool,
    pub keywords: &'a [String],
    pub entities: &'a EntityBundle,
    pub entity_preview: usize,
}

/// Known = present, non-empty and not the "Unknown" bucket.
fn known_location<'a>(top: Option<&'a CategoryCount>) -> Option<&'a CategoryCount> {
    top.filter(|c| !c.label.is_empty() && c.label != UNKNOWN_LABEL)
}

fn entity_line(entities: &EntityBundle, preview: usize) -> Option<String> {
    let groups: [(&str, &[String]); 4] = [
        ("Locations mentioned", entities.locations.as_slice()),
        ("People referenced", entities.people.as_slice()),
        ("Organizations", entities.organizations.as_slice()),
        ("Dates", entities.dates.as_slice()),
    ];
    let parts: Vec<String> = groups
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(name, items)| {
            let shown: Vec<&str> = items.iter().take(preview).map(String::as_str).collect();
            format!("{name}: {}", shown.join(", "))
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("\n- Entities: {}.", parts.join("; ")))
    }
}

/// Build the summary text. `total_reports == 0` short-circuits to [`NO_DATA_SUMMARY`].
pub fn compose_summary(input: &SummaryInputs<'_>) -> String {
    if input.total_reports == 0 {
        return NO_DATA_SUMMARY.to_string();
    }

    let (type_label, type_count) = input
        .top_type
        .map(|c| (c.label.as_str(), c.count))
        .unwrap_or(("", 0));

    let mut out = format!(
        "Weekly Crime Report:\n- Total reports: {}\n- Most common type: '{}' ({} reports)",
        input.total_reports, type_label, type_count
    );

    if input.type_spike {
        out.push_str(&format!(
            "\n- Alert: '{type_label}' reports are significantly higher than average."
        ));
    }

    let location = known_location(input.top_location);
    match location {
        Some(loc) => {
            out.push_str(&format!(
                "\n- Area with highest activity: '{}' ({} reports)",
                loc.label, loc.count
            ));
            if input.location_spike {
                out.push_str(" (Unusual spike detected!)");
            }
            out.push('.');
        }
        None => out.push_str(
            "\n- Most affected area: Not determined due to missing/incomplete location data. \
             Recommend improving report location details for better hotspot analysis.",
        ),
    }

    if !input.keywords.is_empty() {
        out.push_str(&format!("\n- Key topics: {}.", input.keywords.join(", ")));
    }

    if let Some(line) = entity_line(input.entities, input.entity_preview) {
        out.push_str(&line);
    }

    out.push_str("\n\nSafety Recommendations:");
    if type_label.to_lowercase().contains("emergency") {
        out.push_str("\n- Ensure emergency response teams are on high alert.");
        out.push_str("\n- Encourage the public to report emergencies with precise locations.");
    }
    out.push_str("\n- Increase community awareness and encourage detailed reporting.");
    match location {
        Some(loc) => out.push_str(&format!(
            "\n- Consider targeted patrols or interventions in '{}'.",
            loc.label
        )),
        None => out.push_str("\n- Monitor general hotspots and improve location data collection."),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cc(label: &str, count: usize) -> CategoryCount {
        CategoryCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn zero_reports_is_fixed_sentence() {
        let entities = EntityBundle::default();
        let s = compose_summary(&SummaryInputs {
            total_reports: 0,
            top_type: None,
            top_location: None,
            type_spike: true,
            location_spike: true,
            keywords: &["ignored".to_string()],
            entities: &entities,
            entity_preview: DEFAULT_ENTITY_PREVIEW,
        });
        assert_eq!(s, NO_DATA_SUMMARY);
    }

    #[test]
    fn full_summary_layout() {
        let ty = cc("EMERGENCY", 3);
        let loc = cc("Main St", 2);
        let entities = EntityBundle {
            locations: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            people: vec![],
            organizations: vec!["Central Police".into()],
            dates: vec![],
        };
        let keywords = vec!["window".to_string(), "car".to_string()];
        let s = compose_summary(&SummaryInputs {
            total_reports: 4,
            top_type: Some(&ty),
            top_location: Some(&loc),
            type_spike: false,
            location_spike: true,
            keywords: &keywords,
            entities: &entities,
            entity_preview: DEFAULT_ENTITY_PREVIEW,
        });
        let expected = "Weekly Crime Report:\n\
- Total reports: 4\n\
- Most common type: 'EMERGENCY' (3 reports)\n\
- Area with highest activity: 'Main St' (2 reports) (Unusual spike detected!).\n\
- Key topics: window, car.\n\
- Entities: Locations mentioned: A, B, C; Organizations: Central Police.\n\
\n\
Safety Recommendations:\n\
- Ensure emergency response teams are on high alert.\n\
- Encourage the public to report emergencies with precise locations.\n\
- Increase community awareness and encourage detailed reporting.\n\
- Consider targeted patrols or interventions in 'Main St'.";
        assert_eq!(s, expected);
    }

    #[test]
    fn unknown_location_gets_data_quality_remark() {
        let ty = cc("THEFT", 1);
        let loc = cc(UNKNOWN_LABEL, 1);
        let entities = EntityBundle::default();
        let s = compose_summary(&SummaryInputs {
            total_reports: 1,
            top_type: Some(&ty),
            top_location: Some(&loc),
            type_spike: true,
            location_spike: true,
            keywords: &[],
            entities: &entities,
            entity_preview: DEFAULT_ENTITY_PREVIEW,
        });
        assert!(s.contains("- Alert: 'THEFT' reports are significantly higher than average."));
        assert!(s.contains("Most affected area: Not determined"));
        assert!(s.ends_with("- Monitor general hotspots and improve location data collection."));
        assert!(!s.contains("Key topics"));
        assert!(!s.contains("Entities"));
        assert!(!s.contains("emergency response teams"));
    }
}
