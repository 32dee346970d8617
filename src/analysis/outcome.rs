//! Deal outcome evaluation.
//!
//! Derives the settlement price or residual gap from the final offers of a
//! completed session, plus the live gap metrics shown while a session runs.

use crate::error::AnalysisError;
use crate::models::{AnalysisRecord, DealOutcome, DealStatus, LiveState, Message, SessionConfig};
use tracing::debug;

/// Evaluate the outcome of a completed negotiation.
///
/// A closed deal settles at the midpoint of the two final offers, rounded half
/// up to a whole dollar. A failed deal reports the absolute gap between the
/// offers and passes both offers through unchanged.
pub fn evaluate(
    analysis: &AnalysisRecord,
    config: &SessionConfig,
) -> Result<DealOutcome, AnalysisError> {
    let prices = analysis.prices()?;

    let outcome = match analysis.deal_status {
        DealStatus::Closed => {
            config.validate()?;
            let price = settlement_price(prices.sales_offer, prices.customer_offer);
            let deviation_pct = (price as f64 - config.target_price) / config.target_price * 100.0;
            DealOutcome::Closed {
                price,
                deviation_pct,
            }
        }
        DealStatus::Failed => DealOutcome::Failed {
            gap: (prices.sales_offer - prices.customer_offer).abs().round() as i64,
            sales_final: prices.sales_offer,
            customer_final: prices.customer_offer,
        },
    };

    debug!("Evaluated {} deal: {:?}", analysis.deal_status, outcome);
    Ok(outcome)
}

/// Midpoint of two non-negative offers, rounded half up.
fn settlement_price(sales_offer: f64, customer_offer: f64) -> i64 {
    ((sales_offer + customer_offer) / 2.0).round() as i64
}

/// Number of rounds a transcript covers, counting one sales and one customer
/// message per round. A trailing unanswered message counts as a round.
pub fn rounds_used(messages: &[Message]) -> usize {
    messages.len().div_ceil(2)
}

/// Gap metrics for an in-progress session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveGap {
    /// Absolute difference between the current offers.
    pub gap: f64,
    /// Gap as a percentage of the offers' midpoint.
    pub gap_pct: f64,
}

/// Compute the current price gap from a live state update.
///
/// Returns `None` when both offers are zero, since the percentage has no base.
pub fn live_gap(state: &LiveState) -> Option<LiveGap> {
    let gap = (state.sales_offer - state.customer_offer).abs();
    let midpoint = (state.sales_offer + state.customer_offer) / 2.0;

    if midpoint == 0.0 || !midpoint.is_finite() {
        return None;
    }

    Some(LiveGap {
        gap,
        gap_pct: gap / midpoint * 100.0,
    })
}

/// Fraction of the round budget consumed, clamped to `0.0..=1.0`.
pub fn round_progress(state: &LiveState, config: &SessionConfig) -> f64 {
    let max_rounds = config.max_rounds.max(1) as f64;
    let round = state.round.max(1) as f64;
    (round / max_rounds).min(1.0)
}
