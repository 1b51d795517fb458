use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::providers::ProviderError;
use crate::risk::{RiskFactorResult, DEFAULT_RISK_SCORE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractRiskConfig {
    pub verified_bonus: f64,
    pub unverified_penalty: f64,
}

impl Default for ContractRiskConfig {
    fn default() -> Self {
        Self {
            verified_bonus: 1.0,
            unverified_penalty: 2.0,
        }
    }
}

/// Scores a contract by whether its source code is published
#[derive(Debug, Clone, Default)]
pub struct ContractRiskEvaluator {
    config: ContractRiskConfig,
}

impl ContractRiskEvaluator {
    pub fn new(config: ContractRiskConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, lookup: Result<bool, ProviderError>) -> RiskFactorResult {
        match lookup {
            Ok(true) => RiskFactorResult::evaluated(
                DEFAULT_RISK_SCORE - self.config.verified_bonus,
                vec!["Contract verified".to_string()],
            ),
            Ok(false) => RiskFactorResult::evaluated(
                DEFAULT_RISK_SCORE + self.config.unverified_penalty,
                vec!["Contract not verified".to_string()],
            ),
            Err(e) => {
                warn!(error = %e, "Contract verification lookup failed");
                let reason = e.to_string();
                RiskFactorResult::degraded(
                    reason.clone(),
                    format!("Contract verification check failed: {}", reason),
                )
            }
        }
    }
}
