//! Negotiation analysis.
//!
//! Three independent, stateless operations over a finished session:
//! outcome evaluation, technique aggregation and coaching section extraction.
//! None of them depends on another's output.

pub mod aggregator;
pub mod outcome;
pub mod sections;

pub use aggregator::*;
pub use outcome::*;
pub use sections::*;

use crate::error::AnalysisError;
use crate::models::{AnalysisRecord, DealOutcome, Message, SessionConfig, TechniqueCount};
use serde::{Deserialize, Serialize};

/// Everything derived from one session, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub outcome: DealOutcome,
    pub techniques: Vec<TechniqueCount>,
    pub sections: CoachingSections,
    pub rounds_used: usize,
}

impl SessionSummary {
    /// Run all analyses over a session.
    pub fn build(
        messages: &[Message],
        analysis: &AnalysisRecord,
        config: &SessionConfig,
        patterns: &SectionPatterns,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            outcome: evaluate(analysis, config)?,
            techniques: aggregate(messages),
            sections: extract_coaching_sections(&analysis.full_analysis, patterns),
            rounds_used: rounds_used(messages),
        })
    }
}
