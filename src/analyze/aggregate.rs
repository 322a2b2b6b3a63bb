//! Group report records by a categorical field and count them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::reports::ReportRecord;

/// Label used for records whose selected field is missing or empty.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Which categorical attribute of a record to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Type,
    Location,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Type => "type",
            Dimension::Location => "location",
        }
    }

    /// Raw field value; `None` when missing or empty.
    fn value<'a>(&self, record: &'a ReportRecord) -> Option<&'a str> {
        let v = match self {
            Dimension::Type => record.kind.as_deref(),
            Dimension::Location => record.location.as_deref(),
        };
        v.filter(|s| !s.is_empty())
    }
}

/// One `(label, count)` pair of a category aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

fn tally<'a, I: IntoIterator<Item = &'a str>>(labels: I) -> Vec<CategoryCount> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut out: Vec<CategoryCount> = Vec::new();
    for label in labels {
        match index.get(label) {
            Some(&i) => out[i].count += 1,
            None => {
                index.insert(label, out.len());
                out.push(CategoryCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    out
}

/// Count records per label, missing values grouped under [`UNKNOWN_LABEL`].
/// Exact string match; output keeps first-seen order.
pub fn count_by(records: &[ReportRecord], dim: Dimension) -> Vec<CategoryCount> {
    tally(records.iter().map(|r| dim.value(r).unwrap_or(UNKNOWN_LABEL)))
}

/// Like [`count_by`] but records with a missing value are skipped.
pub fn count_known(records: &[ReportRecord], dim: Dimension) -> Vec<CategoryCount> {
    tally(records.iter().filter_map(|r| dim.value(r)))
}

/// Highest count; ties go to the label seen first.
pub fn most_common(counts: &[CategoryCount]) -> Option<&CategoryCount> {
    let mut best: Option<&CategoryCount> = None;
    for c in counts {
        if best.map_or(true, |b| c.count > b.count) {
            best = Some(c);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(kind: Option<&str>, location: Option<&str>) -> ReportRecord {
        ReportRecord {
            description: None,
            kind: kind.map(str::to_string),
            location: location.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn missing_and_empty_become_unknown() {
        let rs = vec![
            rec(Some("THEFT"), Some("Main St")),
            rec(Some("THEFT"), None),
            rec(None, Some("")),
        ];
        let by_loc = count_by(&rs, Dimension::Location);
        assert_eq!(
            by_loc,
            vec![
                CategoryCount { label: "Main St".into(), count: 1 },
                CategoryCount { label: UNKNOWN_LABEL.into(), count: 2 },
            ]
        );
        let known = count_known(&rs, Dimension::Location);
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn grouping_is_exact_match() {
        let rs = vec![
            rec(None, Some("Main St")),
            rec(None, Some("main st")),
            rec(None, Some("Main St ")),
        ];
        assert_eq!(count_by(&rs, Dimension::Location).len(), 3);
    }

    #[test]
    fn most_common_prefers_first_on_tie() {
        let rs = vec![
            rec(Some("B"), None),
            rec(Some("A"), None),
            rec(Some("A"), None),
            rec(Some("B"), None),
        ];
        let counts = count_by(&rs, Dimension::Type);
        let top = most_common(&counts).unwrap();
        assert_eq!(top.label, "B");
        assert_eq!(top.count, 2);
        assert!(most_common(&[]).is_none());
    }
}
