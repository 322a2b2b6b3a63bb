// src/analyze/ner.rs
//! Rule-based named-entity extraction over raw (original-case) report text.
//!
//! Four naive pattern families:
//! - locations: the span after `at|in|near|on` that starts with a capital letter
//!   (letters, digits and whitespace are captured greedily, so it can run on
//!   into the next words)
//! - people: two adjacent capitalized words (`Firstname Lastname`); any two
//!   adjacent capitalized words match, sentence starts included
//! - organizations: a capitalized word followed by a known institution suffix
//! - dates: `d{1,2}[/-]d{1,2}[/-]d{2,4}` or a weekday name, optionally after `on `/`at `
//!
//! Every list is deduplicated keeping first occurrence.
//!
//! Notes:
//! - Regexes are compiled once (`Lazy`) and must stay compatible with the `regex` crate.
//! - Matches are returned verbatim; nothing is trimmed or re-cased.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Suffixes that turn a capitalized word into an organization.
pub const ORG_SUFFIXES: &[&str] = &[
    "Police",
    "Department",
    "School",
    "Hospital",
    "Bank",
    "Store",
    "Center",
    "Station",
];

static RE_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:at|in|near|on) ([A-Z][a-zA-Z0-9\s]+)").expect("location regex"));

static RE_PERSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+ [A-Z][a-z]+)").expect("person regex"));

static RE_ORGANIZATION: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"\b([A-Z][a-zA-Z]+ (?:{}))", ORG_SUFFIXES.join("|"));
    Regex::new(&pattern).expect("organization regex")
});

static RE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:on |at )?([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}|\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b)",
    )
    .expect("date regex")
});

/// Extracted entities, one list per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    pub locations: Vec<String>,
    pub people: Vec<String>,
    pub organizations: Vec<String>,
    pub dates: Vec<String>,
}

impl EntityBundle {
    /// True when no category has any entry.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.people.is_empty()
            && self.organizations.is_empty()
            && self.dates.is_empty()
    }
}

/// First capture group of every non-overlapping match, deduplicated.
fn capture_all(re: &Regex, text: &str) -> Vec<String> {
    let found = re
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    dedup_in_order(found)
}

fn dedup_in_order<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

pub fn extract_locations(text: &str) -> Vec<String> {
    capture_all(&RE_LOCATION, text)
}

pub fn extract_people(text: &str) -> Vec<String> {
    capture_all(&RE_PERSON, text)
}

pub fn extract_organizations(text: &str) -> Vec<String> {
    capture_all(&RE_ORGANIZATION, text)
}

pub fn extract_dates(text: &str) -> Vec<String> {
    capture_all(&RE_DATE, text)
}

/// Run all four extractors over `text`.
pub fn extract_entities(text: &str) -> EntityBundle {
    EntityBundle {
        locations: extract_locations(text),
        people: extract_people(text),
        organizations: extract_organizations(text),
        dates: extract_dates(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_and_location_after_near() {
        let b = extract_entities("Reported near Central Police station");
        assert_eq!(b.organizations, vec!["Central Police"]);
        assert_eq!(b.locations, vec!["Central Police station"]);
        assert_eq!(b.people, vec!["Central Police"]);
        assert!(b.dates.is_empty());
    }

    #[test]
    fn lowercase_text_has_no_entities() {
        let b = extract_entities("someone broke a window");
        assert!(b.is_empty());
    }

    #[test]
    fn location_needs_lowercase_preposition() {
        assert!(extract_locations("At Main Street").is_empty());
        assert_eq!(extract_locations("seen at Main Street."), vec!["Main Street"]);
    }

    #[test]
    fn location_prefix_must_be_a_whole_word() {
        // "that" ends in "at" but the prefix needs a word boundary in front.
        assert!(extract_locations("Xthat Main").is_empty());
        assert_eq!(extract_locations("Cat in Oak Park!"), vec!["Oak Park"]);
    }

    #[test]
    fn dates_numeric_and_weekdays() {
        let d = extract_dates("It happened on 12/05/2024, again on friday and on Friday; 3-4-24");
        assert_eq!(d, vec!["12/05/2024", "friday", "Friday", "3-4-24"]);
    }

    #[test]
    fn lists_are_deduplicated() {
        let b = extract_entities("John Smith saw it. John Smith called. John Smith left.");
        assert_eq!(b.people, vec!["John Smith"]);
    }

    #[test]
    fn org_suffix_vocabulary() {
        let o = extract_organizations("Went to First Bank then Lincoln School and Mercy Hospital");
        assert_eq!(o, vec!["First Bank", "Lincoln School", "Mercy Hospital"]);
    }
}
