//! Session file loading.
//!
//! A session file is the JSON export of one completed negotiation:
//! the transcript, the simulator's analysis and the operator's settings.

use crate::models::{AnalysisRecord, Message, SessionConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A completed negotiation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Transcript in turn order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Post-session analysis.
    pub analysis: AnalysisRecord,
    /// Operator settings; defaults apply when omitted.
    #[serde(default)]
    pub config: SessionConfig,
}

impl Session {
    /// Parse a session from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let session: Session =
            serde_json::from_str(content).context("Failed to parse session JSON")?;
        debug!(
            "Parsed session: {} messages, deal {}",
            session.messages.len(),
            session.analysis.deal_status
        );
        Ok(session)
    }

    /// Load a session from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid session file: {}", path.display()))
    }
}
