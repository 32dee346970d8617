//! Data models for negotiation sessions.
//!
//! This module contains the transcript, analysis and configuration records
//! produced by the negotiation simulator, plus the derived view-models the
//! analysis engine hands to the report layer.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The side that sent a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    /// The seller being trained
    Sales,
    /// The simulated buyer
    Customer,
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agent::Sales => write!(f, "Sales"),
            Agent::Customer => write!(f, "Customer"),
        }
    }
}

impl Agent {
    /// Returns an emoji representation of the agent.
    pub fn emoji(&self) -> &'static str {
        match self {
            Agent::Sales => "🎯",
            Agent::Customer => "🏢",
        }
    }
}

/// A single turn of the negotiation transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent the message.
    pub agent: Agent,
    /// Negotiation round (1-indexed).
    pub round: u32,
    /// Message text.
    pub content: String,
    /// Persuasion techniques tagged on this message, in tagging order.
    #[serde(default)]
    pub techniques: Vec<String>,
}

/// Final state of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Closed,
    Failed,
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealStatus::Closed => write!(f, "closed"),
            DealStatus::Failed => write!(f, "failed"),
        }
    }
}

/// The last offer made by each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalPrices {
    pub sales_offer: f64,
    pub customer_offer: f64,
}

impl FinalPrices {
    /// Checks that both offers are finite and non-negative.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (side, value) in [("sales", self.sales_offer), ("customer", self.customer_offer)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidOffer { side, value });
            }
        }
        Ok(())
    }
}

/// Post-session analysis delivered by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Whether the negotiation reached agreement.
    pub deal_status: DealStatus,
    /// Final offers; required for both outcomes.
    #[serde(default)]
    pub final_prices: Option<FinalPrices>,
    /// Free-form coaching analysis text.
    #[serde(default)]
    pub full_analysis: String,
}

impl AnalysisRecord {
    /// Returns the final offers, or a validation error if they are absent or malformed.
    pub fn prices(&self) -> Result<FinalPrices, AnalysisError> {
        let prices = self.final_prices.ok_or(AnalysisError::MissingFinalPrices)?;
        prices.validate()?;
        Ok(prices)
    }
}

/// Difficulty of the simulated customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerPersona {
    Easy,
    #[default]
    Moderate,
    Tough,
    Strategic,
}

impl fmt::Display for CustomerPersona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerPersona::Easy => write!(f, "easy"),
            CustomerPersona::Moderate => write!(f, "moderate"),
            CustomerPersona::Tough => write!(f, "tough"),
            CustomerPersona::Strategic => write!(f, "strategic"),
        }
    }
}

impl CustomerPersona {
    /// Short hint describing who the persona suits.
    pub fn hint(&self) -> &'static str {
        match self {
            CustomerPersona::Easy => "Good for beginners",
            CustomerPersona::Moderate => "Standard training",
            CustomerPersona::Tough => "Advanced challenge",
            CustomerPersona::Strategic => "Expert level",
        }
    }
}

/// Operator settings for a training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    #[serde(default = "default_target_price")]
    pub target_price: f64,

    /// Seller's floor.
    #[serde(default = "default_minimum_price")]
    pub minimum_price: f64,

    #[serde(default = "default_customer_budget")]
    pub customer_budget: f64,

    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    #[serde(default = "default_product_name")]
    pub product_name: String,

    #[serde(default)]
    pub customer_persona: CustomerPersona,

    #[serde(default)]
    pub product_details: String,

    #[serde(default)]
    pub customer_requirements: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_price: default_target_price(),
            minimum_price: default_minimum_price(),
            customer_budget: default_customer_budget(),
            max_rounds: default_max_rounds(),
            product_name: default_product_name(),
            customer_persona: CustomerPersona::default(),
            product_details: String::new(),
            customer_requirements: String::new(),
        }
    }
}

fn default_target_price() -> f64 {
    500_000.0
}

fn default_minimum_price() -> f64 {
    350_000.0
}

fn default_customer_budget() -> f64 {
    350_000.0
}

fn default_max_rounds() -> u32 {
    7
}

fn default_product_name() -> String {
    "Enterprise AI Training Program".to_string()
}

impl SessionConfig {
    /// Checks the invariants the analysis engine relies on.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.target_price.is_finite() || self.target_price <= 0.0 {
            return Err(AnalysisError::InvalidTargetPrice(self.target_price));
        }
        if self.max_rounds == 0 {
            return Err(AnalysisError::InvalidRounds);
        }
        Ok(())
    }
}

/// Derived result of a completed negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DealOutcome {
    /// Agreement at the midpoint of the final offers.
    Closed {
        price: i64,
        /// Signed percentage away from the target price, unrounded.
        deviation_pct: f64,
    },
    /// No agreement within the round limit.
    Failed {
        gap: i64,
        sales_final: f64,
        customer_final: f64,
    },
}

impl DealOutcome {
    pub fn is_closed(&self) -> bool {
        matches!(self, DealOutcome::Closed { .. })
    }

    /// Banner title for the outcome.
    pub fn status_label(&self) -> &'static str {
        match self {
            DealOutcome::Closed { .. } => "Deal Reached",
            DealOutcome::Failed { .. } => "No Deal",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            DealOutcome::Closed { .. } => "🤝",
            DealOutcome::Failed { .. } => "❌",
        }
    }

    /// One-line description shown under the banner title.
    pub fn message(&self) -> String {
        match self {
            DealOutcome::Closed { price, .. } => {
                format!("Successfully closed at {}", format_price(*price as f64))
            }
            DealOutcome::Failed { .. } => "Negotiation ended without agreement".to_string(),
        }
    }
}

/// Usage count of one persuasion technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueCount {
    pub label: String,
    pub count: usize,
}

/// Live negotiation status while a session is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStatus {
    Ongoing,
    Closed,
    Failed,
}

/// Incremental state update streamed during a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveState {
    pub round: u32,
    pub deal_status: LiveStatus,
    pub sales_offer: f64,
    pub customer_offer: f64,
}

/// Formats a dollar amount with thousands separators, e.g. `$1,250,000`.
///
/// Fractional cents are dropped after rounding to the nearest dollar.
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
