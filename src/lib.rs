//! Negotiation Review - analysis engine for simulated sales negotiations.
//!
//! Consumes the transcript and free-text analysis of a finished buyer/seller
//! negotiation and derives the deal outcome, technique usage statistics and
//! the coaching sections of the analysis.
//!
//! ```
//! use negotiation_review::analysis::{aggregate, extract_section};
//!
//! assert!(aggregate(&[]).is_empty());
//! assert_eq!(extract_section("Coaching advice\nListen.", "coaching advice"), "Coaching advice\nListen.");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod session;

pub use error::AnalysisError;
