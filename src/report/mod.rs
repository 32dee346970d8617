//! Report assembly and rendering.

pub mod generator;

pub use generator::*;

use crate::analysis::{SectionPatterns, SessionSummary};
use crate::error::AnalysisError;
use crate::models::{DealStatus, Message, SessionConfig};
use crate::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the review report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the session was loaded from.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Deal status reported by the simulator.
    pub deal_status: DealStatus,
    /// Number of transcript messages.
    pub message_count: usize,
}

/// The complete negotiation review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Session settings the negotiation ran with.
    pub config: SessionConfig,
    /// Derived outcome, technique tally and coaching sections.
    pub summary: SessionSummary,
    /// The simulator's analysis text, unmodified.
    pub full_analysis: String,
    /// Transcript in turn order.
    pub messages: Vec<Message>,
}

impl Report {
    /// Analyze a session and assemble its report.
    pub fn build(
        session: &Session,
        source: &str,
        patterns: &SectionPatterns,
    ) -> Result<Self, AnalysisError> {
        let summary = SessionSummary::build(
            &session.messages,
            &session.analysis,
            &session.config,
            patterns,
        )?;

        Ok(Self {
            metadata: ReportMetadata {
                source: source.to_string(),
                generated_at: Utc::now(),
                deal_status: session.analysis.deal_status,
                message_count: session.messages.len(),
            },
            config: session.config.clone(),
            summary,
            full_analysis: session.analysis.full_analysis.clone(),
            messages: session.messages.clone(),
        })
    }
}
