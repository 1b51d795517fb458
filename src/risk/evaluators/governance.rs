use async_trait::async_trait;

use crate::risk::RiskFactorResult;

/// Governance maturity signal for a protocol.
///
/// Real signals (voting-power concentration, token distribution) plug in
/// behind this trait. The shipped implementation is a neutral placeholder.
#[async_trait]
pub trait GovernanceEvaluator: Send + Sync {
    async fn evaluate(&self, protocol_name: &str) -> RiskFactorResult;

    fn name(&self) -> &'static str;
}

/// Returns the neutral score 5.0 with status `Placeholder` for every protocol
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderGovernanceEvaluator;

pub const GOVERNANCE_PLACEHOLDER_NOTE: &str = "Governance analysis needed";

#[async_trait]
impl GovernanceEvaluator for PlaceholderGovernanceEvaluator {
    async fn evaluate(&self, _protocol_name: &str) -> RiskFactorResult {
        RiskFactorResult::placeholder(GOVERNANCE_PLACEHOLDER_NOTE)
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}
