//! Validation errors for negotiation session data.
//!
//! The analysis operations are total over well-formed input. These errors only
//! describe data that breaks the session data model itself.

use thiserror::Error;

/// A session record that violates the data model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The analysis record carries no final offers.
    #[error("analysis record has no final prices")]
    MissingFinalPrices,

    /// A final offer is negative or not a finite number.
    #[error("invalid {side} offer: {value}")]
    InvalidOffer { side: &'static str, value: f64 },

    /// The configured target price cannot be used as a deviation baseline.
    #[error("target price must be a positive number, got {0}")]
    InvalidTargetPrice(f64),

    /// The configured round limit is zero.
    #[error("max rounds must be at least 1")]
    InvalidRounds,
}
