use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::providers::ProviderError;
use crate::risk::{RiskFactorResult, DEFAULT_RISK_SCORE};
use crate::utils::math::{format_usd_compact, non_negative};

/// Thresholds for the TVL-size factor of a protocol assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvlRiskConfig {
    pub low_tvl_threshold_usd: f64,
    pub high_tvl_threshold_usd: f64,
    pub low_tvl_penalty: f64,
    pub high_tvl_bonus: f64,
}

impl Default for TvlRiskConfig {
    fn default() -> Self {
        Self {
            low_tvl_threshold_usd: 10_000_000.0,
            high_tvl_threshold_usd: 1_000_000_000.0,
            low_tvl_penalty: 2.0,
            high_tvl_bonus: 1.0,
        }
    }
}

/// Scores a protocol by the size of its total value locked
#[derive(Debug, Clone, Default)]
pub struct TvlRiskEvaluator {
    config: TvlRiskConfig,
}

impl TvlRiskEvaluator {
    pub fn new(config: TvlRiskConfig) -> Self {
        Self { config }
    }

    /// Missing, negative or non-finite TVL counts as zero and takes the
    /// low-TVL penalty.
    pub fn evaluate(&self, tvl: Option<f64>) -> RiskFactorResult {
        let current_tvl = non_negative(tvl);
        let mut risk_score = DEFAULT_RISK_SCORE;
        let mut factors = Vec::new();

        if current_tvl < self.config.low_tvl_threshold_usd {
            risk_score += self.config.low_tvl_penalty;
            factors.push(format!(
                "Low TVL (< {})",
                format_usd_compact(self.config.low_tvl_threshold_usd)
            ));
        } else if current_tvl > self.config.high_tvl_threshold_usd {
            risk_score -= self.config.high_tvl_bonus;
            factors.push(format!(
                "High TVL (> {})",
                format_usd_compact(self.config.high_tvl_threshold_usd)
            ));
        }

        debug!(
            current_tvl = %current_tvl,
            risk_score = %risk_score,
            "Calculated TVL risk"
        );

        RiskFactorResult::evaluated(risk_score, factors).with_current_value(current_tvl)
    }

    /// Evaluate the outcome of a TVL lookup, degrading on provider failure
    pub fn evaluate_lookup(&self, lookup: Result<Option<f64>, ProviderError>) -> RiskFactorResult {
        match lookup {
            Ok(tvl) => self.evaluate(tvl),
            Err(e) => {
                let reason = e.to_string();
                RiskFactorResult::degraded(reason.clone(), format!("TVL data unavailable: {}", reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::FactorStatus;

    fn evaluator() -> TvlRiskEvaluator {
        TvlRiskEvaluator::default()
    }

    #[test]
    fn test_zero_tvl_takes_low_tvl_penalty() {
        let result = evaluator().evaluate(Some(0.0));
        assert_eq!(result.score(), 7.0);
        assert_eq!(result.explanations(), ["Low TVL (< $10M)"]);
        assert_eq!(result.current_value(), Some(0.0));
    }

    #[test]
    fn test_missing_tvl_counts_as_zero() {
        let result = evaluator().evaluate(None);
        assert_eq!(result.score(), 7.0);
        assert_eq!(result.status(), &FactorStatus::Evaluated);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(evaluator().evaluate(Some(9_999_999.0)).score(), 7.0);

        let at_threshold = evaluator().evaluate(Some(10_000_000.0));
        assert_eq!(at_threshold.score(), 5.0);
        assert!(at_threshold.explanations().is_empty());

        assert_eq!(evaluator().evaluate(Some(1_000_000_000.0)).score(), 5.0);

        let large = evaluator().evaluate(Some(1_000_000_001.0));
        assert_eq!(large.score(), 4.0);
        assert_eq!(large.explanations(), ["High TVL (> $1B)"]);
    }

    #[test]
    fn test_negative_and_nan_tvl_are_treated_as_zero() {
        assert_eq!(evaluator().evaluate(Some(-50.0)).score(), 7.0);
        assert_eq!(evaluator().evaluate(Some(f64::NAN)).score(), 7.0);
    }

    #[test]
    fn test_custom_penalty_is_still_clamped() {
        let evaluator = TvlRiskEvaluator::new(TvlRiskConfig {
            low_tvl_penalty: 20.0,
            ..TvlRiskConfig::default()
        });
        assert_eq!(evaluator.evaluate(Some(1.0)).score(), 10.0);
    }

    #[test]
    fn test_lookup_failure_degrades_to_neutral() {
        let error = ProviderError::Status { service: "defillama", status: 503 };
        let result = evaluator().evaluate_lookup(Err(error));

        assert_eq!(result.score(), 5.0);
        assert!(result.is_degraded());
        assert!(result.explanations()[0].starts_with("TVL data unavailable"));
    }
}
