// Risk factor results shared by every evaluator
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::risk::DEFAULT_RISK_SCORE;
use crate::utils::math::clamp_score;

/// The fixed set of factors a protocol assessment can contain.
///
/// Declaration order is the order factors are reported and scanned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskFactorKind {
    #[serde(rename = "tvl_risk")]
    Tvl,
    #[serde(rename = "governance_risk")]
    Governance,
    #[serde(rename = "contract_risk")]
    Contract,
}

impl RiskFactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactorKind::Tvl => "tvl_risk",
            RiskFactorKind::Governance => "governance_risk",
            RiskFactorKind::Contract => "contract_risk",
        }
    }
}

impl fmt::Display for RiskFactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a factor score was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FactorStatus {
    /// Scored from real input data
    Evaluated,
    /// Input data was unavailable; the neutral default was substituted
    Degraded { reason: String },
    /// Extension point without a real signal yet
    Placeholder,
}

/// One risk signal's evaluation on the 1-10 scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactorResult {
    score: f64,
    explanations: Vec<String>,
    status: FactorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_value: Option<f64>,
}

impl RiskFactorResult {
    /// Result computed from real data. The score is clamped into [1, 10].
    pub fn evaluated(score: f64, explanations: Vec<String>) -> Self {
        Self {
            score: clamp_score(score),
            explanations,
            status: FactorStatus::Evaluated,
            current_value: None,
        }
    }

    /// Neutral result standing in for data that could not be fetched
    pub fn degraded(reason: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            score: DEFAULT_RISK_SCORE,
            explanations: vec![explanation.into()],
            status: FactorStatus::Degraded { reason: reason.into() },
            current_value: None,
        }
    }

    pub fn placeholder(explanation: impl Into<String>) -> Self {
        Self {
            score: DEFAULT_RISK_SCORE,
            explanations: vec![explanation.into()],
            status: FactorStatus::Placeholder,
            current_value: None,
        }
    }

    pub fn with_current_value(mut self, value: f64) -> Self {
        self.current_value = Some(value);
        self
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn explanations(&self) -> &[String] {
        &self.explanations
    }

    pub fn status(&self) -> &FactorStatus {
        &self.status
    }

    pub fn current_value(&self) -> Option<f64> {
        self.current_value
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, FactorStatus::Degraded { .. })
    }
}

/// Per-factor results keyed by factor, iterated in declaration order
pub type RiskFactorMap = BTreeMap<RiskFactorKind, RiskFactorResult>;
