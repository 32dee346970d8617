//! Technique aggregation and statistics.
//!
//! This module counts the persuasion techniques tagged on transcript messages
//! and provides the helpers the report uses to display them.

use crate::models::{Message, TechniqueCount};
use std::collections::HashMap;
use tracing::debug;

/// Standard technique definitions shown alongside the tally.
///
/// This is display material only. The aggregator counts whatever labels the
/// simulator emits.
pub const TECHNIQUE_LEGEND: &[(&str, &str)] = &[
    (
        "Value Proposition",
        "Emphasizing ROI, benefits, and outcomes",
    ),
    (
        "Social Proof",
        "Referencing other clients and success stories",
    ),
    ("Urgency", "Creating time pressure or limited availability"),
    (
        "Reciprocity",
        "Making concessions to get something in return",
    ),
    (
        "Anchoring",
        "Setting price expectations with high initial offers",
    ),
    ("Loss Aversion", "Highlighting what customer might miss out on"),
    ("Authority", "Leveraging expertise and credentials"),
];

/// Count technique usage across all messages.
///
/// Entries are ordered by count, highest first. Labels with equal counts keep
/// the order in which they first appear in the transcript.
pub fn aggregate(messages: &[Message]) -> Vec<TechniqueCount> {
    let mut tally: Vec<TechniqueCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for technique in messages.iter().flat_map(|m| m.techniques.iter()) {
        match index.get(technique.as_str()) {
            Some(&i) => tally[i].count += 1,
            None => {
                index.insert(technique.as_str(), tally.len());
                tally.push(TechniqueCount {
                    label: technique.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by_key is stable, so first-seen order survives for ties
    tally.sort_by_key(|t| std::cmp::Reverse(t.count));

    debug!(
        "Aggregated {} distinct techniques from {} messages",
        tally.len(),
        messages.len()
    );

    tally
}

/// Highest count in a tally, or 0 if it is empty.
pub fn max_count(tally: &[TechniqueCount]) -> usize {
    tally.iter().map(|t| t.count).max().unwrap_or(0)
}

/// Total number of technique tags counted.
pub fn total_occurrences(tally: &[TechniqueCount]) -> usize {
    tally.iter().map(|t| t.count).sum()
}

/// Bar length for `count` relative to the most used technique, in `0.0..=1.0`.
pub fn bar_fraction(count: usize, max: usize) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (count as f64 / max as f64).min(1.0)
}

/// Turn a wire label such as `social_proof` into `social proof`.
pub fn humanize_label(label: &str) -> String {
    label.replace('_', " ")
}

/// Usage phrase for a count, e.g. "Used 1 time" or "Used 3 times".
pub fn usage_phrase(count: usize) -> String {
    if count == 1 {
        "Used 1 time".to_string()
    } else {
        format!("Used {} times", count)
    }
}
