// Composite risk scoring across independent factors
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::risk::{RiskFactorMap, DEFAULT_RISK_SCORE};
use crate::utils::math::mean;

/// Discrete risk classification of a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Classify with inclusive upper bounds: 2, 4, 6, 8. NaN maps to `Medium`.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s.is_nan() => RiskLevel::Medium,
            s if s <= 2.0 => RiskLevel::VeryLow,
            s if s <= 4.0 => RiskLevel::Low,
            s if s <= 6.0 => RiskLevel::Medium,
            s if s <= 8.0 => RiskLevel::High,
            _ => RiskLevel::VeryHigh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "VERY_LOW",
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::VeryHigh => "VERY_HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation of the factor results for one subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeRiskAssessment {
    per_factor_results: RiskFactorMap,
    composite_score: f64,
    risk_level: RiskLevel,
}

impl CompositeRiskAssessment {
    pub fn per_factor_results(&self) -> &RiskFactorMap {
        &self.per_factor_results
    }

    pub fn composite_score(&self) -> f64 {
        self.composite_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// True when any factor fell back to the neutral default
    pub fn is_degraded(&self) -> bool {
        self.per_factor_results.values().any(|result| result.is_degraded())
    }
}

/// Combines factor scores with an unweighted mean
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeRiskScorer;

impl CompositeRiskScorer {
    pub fn new() -> Self {
        Self
    }

    /// Mean of the usable factor scores, 5.0 when there are none
    pub fn composite_score(&self, factors: &RiskFactorMap) -> f64 {
        let scores: Vec<f64> = factors
            .values()
            .map(|result| result.score())
            .filter(|score| score.is_finite())
            .collect();

        mean(&scores).unwrap_or(DEFAULT_RISK_SCORE)
    }

    pub fn assess(&self, factors: RiskFactorMap) -> CompositeRiskAssessment {
        let composite_score = self.composite_score(&factors);
        let risk_level = RiskLevel::from_score(composite_score);

        debug!(
            factor_count = factors.len(),
            composite_score = %composite_score,
            risk_level = %risk_level,
            "Calculated composite risk"
        );

        CompositeRiskAssessment {
            per_factor_results: factors,
            composite_score,
            risk_level,
        }
    }
}
