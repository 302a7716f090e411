//! Structural checks on generated itineraries.
//!
//! The model is trusted to follow the requested shape; these checks only
//! report where it did not. Findings are logged by the callers, never used
//! to reject a result.

use serde_json::Value;
use tw_domain::itinerary::ItineraryDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    NotAnItinerary(String),
    NoDays,
    DayCount { expected: u32, actual: usize },
    NonContiguousDays(Vec<u32>),
    EmptyDay(u32),
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::NotAnItinerary(e) => write!(f, "not an itinerary document: {e}"),
            Finding::NoDays => f.write_str("itinerary has no days"),
            Finding::DayCount { expected, actual } => {
                write!(f, "expected {expected} days, got {actual}")
            }
            Finding::NonContiguousDays(days) => write!(f, "day indices not 1..n: {days:?}"),
            Finding::EmptyDay(d) => write!(f, "day {d} has no activities"),
        }
    }
}

/// Check day numbering, day count and per-day content.
pub fn check_itinerary(value: &Value, expected_days: Option<u32>) -> Vec<Finding> {
    let doc = match ItineraryDocument::from_value(value) {
        Ok(doc) => doc,
        Err(e) => return vec![Finding::NotAnItinerary(e.to_string())],
    };

    let mut findings = Vec::new();
    if doc.days.is_empty() {
        findings.push(Finding::NoDays);
        return findings;
    }
    if let Some(expected) = expected_days {
        if doc.days.len() != expected as usize {
            findings.push(Finding::DayCount {
                expected,
                actual: doc.days.len(),
            });
        }
    }
    if !doc.has_contiguous_days() {
        findings.push(Finding::NonContiguousDays(
            doc.days.iter().map(|d| d.day).collect(),
        ));
    }
    for day in &doc.days {
        if day.activities.is_empty() {
            findings.push(Finding::EmptyDay(day.day));
        }
    }
    findings
}

/// Sorted activity names, for comparing two versions of one plan.
pub fn activity_names(value: &Value) -> Option<Vec<String>> {
    let doc = ItineraryDocument::from_value(value).ok()?;
    let mut names: Vec<String> = doc
        .days
        .iter()
        .flat_map(|d| d.activities.iter().map(|a| a.name.trim().to_lowercase()))
        .collect();
    names.sort();
    Some(names)
}
