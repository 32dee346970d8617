//! Coaching section extraction.
//!
//! The simulator's analysis is free-form text. Coaching subsections are located
//! by a case-insensitive heading pattern and run until the next blank line that
//! is followed by a capitalized line, or until the end of the document.
//!
//! This is a best-effort heuristic. A section whose body contains a blank line
//! followed by a capitalized line (for example a capitalized bullet after an
//! empty line) is cut short there, and overlapping headings can yield truncated
//! or empty sections. Callers render whatever comes back.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Heading pattern for the "what worked well" section.
pub const WORKED_WELL_PATTERN: &str = "things.*did well";

/// Heading pattern for the "areas for improvement" section.
pub const IMPROVEMENT_PATTERN: &str = "areas for improvement";

/// Heading pattern for the "coaching advice" section.
pub const COACHING_PATTERN: &str = "coaching advice";

static NEXT_HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n[A-Z]").unwrap());

/// Decides where a section ends once its heading has been found.
pub trait SectionBoundary {
    /// Byte offset into `rest` (the text after the heading) where the section stops.
    fn section_end(&self, rest: &str) -> usize;
}

/// Ends a section before the next blank line followed by a capitalized line.
///
/// The line break closing the section's last line stays in the section.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLineThenCapital;

impl SectionBoundary for BlankLineThenCapital {
    fn section_end(&self, rest: &str) -> usize {
        NEXT_HEADING_RE
            .find(rest)
            .map(|m| m.start() + 1)
            .unwrap_or(rest.len())
    }
}

/// A compiled heading matcher paired with a section boundary rule.
#[derive(Debug, Clone)]
pub struct HeadingSection<B = BlankLineThenCapital> {
    heading: Regex,
    boundary: B,
}

impl HeadingSection<BlankLineThenCapital> {
    /// Compile a heading pattern with the default boundary rule.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::with_boundary(pattern, BlankLineThenCapital)
    }
}

impl<B: SectionBoundary> HeadingSection<B> {
    /// Compile a heading pattern with a custom boundary rule.
    pub fn with_boundary(pattern: &str, boundary: B) -> Result<Self, regex::Error> {
        let heading = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { heading, boundary })
    }

    /// Extract the first matching section from `document`, verbatim.
    ///
    /// Returns an empty string when the heading does not occur.
    pub fn extract(&self, document: &str) -> String {
        let Some(found) = self.heading.find(document) else {
            return String::new();
        };

        let rest = &document[found.end()..];
        let end = found.end() + self.boundary.section_end(rest);

        document[found.start()..end].to_string()
    }
}

/// Extract the section introduced by `heading_pattern` from `document`.
///
/// Never fails: a missing heading or an invalid pattern yields an empty string.
pub fn extract_section(document: &str, heading_pattern: &str) -> String {
    match HeadingSection::new(heading_pattern) {
        Ok(section) => section.extract(document),
        Err(e) => {
            warn!("Invalid section heading pattern '{}': {}", heading_pattern, e);
            String::new()
        }
    }
}

/// Heading patterns for the three coaching sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPatterns {
    pub worked_well: String,
    pub improvement_areas: String,
    pub coaching_advice: String,
}

impl Default for SectionPatterns {
    fn default() -> Self {
        Self {
            worked_well: WORKED_WELL_PATTERN.to_string(),
            improvement_areas: IMPROVEMENT_PATTERN.to_string(),
            coaching_advice: COACHING_PATTERN.to_string(),
        }
    }
}

/// The three coaching sections pulled out of an analysis document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingSections {
    pub worked_well: String,
    pub improvement_areas: String,
    pub coaching_advice: String,
}

/// Extract all three coaching sections. Each lookup is independent.
pub fn extract_coaching_sections(document: &str, patterns: &SectionPatterns) -> CoachingSections {
    let sections = CoachingSections {
        worked_well: extract_section(document, &patterns.worked_well),
        improvement_areas: extract_section(document, &patterns.improvement_areas),
        coaching_advice: extract_section(document, &patterns.coaching_advice),
    };

    debug!(
        "Extracted coaching sections: worked_well={}B improvement={}B coaching={}B",
        sections.worked_well.len(),
        sections.improvement_areas.len(),
        sections.coaching_advice.len()
    );

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TWO_SECTIONS: &str =
        "Areas for improvement\nBe more concise.\n\nCoaching advice\nPractice active listening.";

    #[test]
    fn test_extract_section_before_next_heading() {
        assert_eq!(
            extract_section(TWO_SECTIONS, "areas for improvement"),
            "Areas for improvement\nBe more concise.\n"
        );
    }

    #[test]
    fn test_extract_last_section_runs_to_end() {
        assert_eq!(
            extract_section(TWO_SECTIONS, "coaching advice"),
            "Coaching advice\nPractice active listening."
        );
    }

    #[test]
    fn test_extract_missing_heading() {
        assert_eq!(extract_section(TWO_SECTIONS, "things.*did well"), "");
        assert_eq!(extract_section("", "coaching advice"), "");
    }

    #[test]
    fn test_extract_invalid_pattern_is_empty() {
        assert_eq!(extract_section(TWO_SECTIONS, "areas (for"), "");
    }

    #[test]
    fn test_extract_wildcard_heading() {
        let document = "Overall a solid effort.\n\n\
            Things you did well:\n- Opened with value\n- stayed calm\n\n\
            Areas for improvement:\n- Conceded too early";

        assert_eq!(
            extract_section(document, WORKED_WELL_PATTERN),
            "Things you did well:\n- Opened with value\n- stayed calm\n"
        );
    }

    #[test]
    fn test_lowercase_line_after_blank_does_not_end_section() {
        let document = "Coaching advice\nListen first.\n\nthen anchor high.\n\nSummary\nDone.";

        assert_eq!(
            extract_section(document, COACHING_PATTERN),
            "Coaching advice\nListen first.\n\nthen anchor high.\n"
        );
    }

    #[test]
    fn test_extra_blank_lines_before_next_heading_are_kept() {
        let document = "Areas for improvement\nBody.\n\n\nNext steps";

        assert_eq!(
            extract_section(document, IMPROVEMENT_PATTERN),
            "Areas for improvement\nBody.\n\n"
        );
    }

    #[test]
    fn test_only_capitalized_line_ends_section() {
        let document = "Coaching advice\nSlow down.\n\nnotes follow\n\nSummary";

        assert_eq!(
            extract_section(document, COACHING_PATTERN),
            "Coaching advice\nSlow down.\n\nnotes follow\n"
        );
    }

    #[test]
    fn test_capitalized_bullet_truncates_section() {
        // Known limitation of the blank-line heuristic.
        let document = "Areas for improvement\nPricing:\n\nDiscounting was too fast.";

        assert_eq!(
            extract_section(document, IMPROVEMENT_PATTERN),
            "Areas for improvement\nPricing:\n"
        );
    }

    #[test]
    fn test_heading_mid_line_starts_at_match() {
        let document = "Key Areas for Improvement include pacing.\n\nNext";
        assert_eq!(
            extract_section(document, IMPROVEMENT_PATTERN),
            "Areas for Improvement include pacing.\n"
        );
    }

    #[test]
    fn test_custom_boundary() {
        struct WholeDocument;
        impl SectionBoundary for WholeDocument {
            fn section_end(&self, rest: &str) -> usize {
                rest.len()
            }
        }

        let section = HeadingSection::with_boundary("areas for improvement", WholeDocument).unwrap();
        assert_eq!(section.extract(TWO_SECTIONS), TWO_SECTIONS);
    }

    #[test]
    fn test_extract_coaching_sections() {
        let sections = extract_coaching_sections(TWO_SECTIONS, &SectionPatterns::default());

        assert_eq!(sections.worked_well, "");
        assert_eq!(
            sections.improvement_areas,
            "Areas for improvement\nBe more concise.\n"
        );
        assert_eq!(
            sections.coaching_advice,
            "Coaching advice\nPractice active listening."
        );
    }

    proptest! {
        #[test]
        fn prop_last_section_runs_to_end(prefix in "[a-z .]{0,40}", body in "[a-z .\n]{0,60}") {
            let document = format!("{}\n\nCoaching advice\n{}", prefix, body);
            let expected = format!("Coaching advice\n{}", body);
            prop_assert_eq!(extract_section(&document, COACHING_PATTERN), expected);
        }

        #[test]
        fn prop_missing_heading_is_empty(document in "[a-z .\n]{0,80}") {
            prop_assert_eq!(extract_section(&document, "zzz heading"), "");
        }

        #[test]
        fn prop_extract_is_idempotent(document in "[A-Za-z .\n]{0,120}") {
            prop_assert_eq!(
                extract_section(&document, IMPROVEMENT_PATTERN),
                extract_section(&document, IMPROVEMENT_PATTERN)
            );
        }
    }
}
