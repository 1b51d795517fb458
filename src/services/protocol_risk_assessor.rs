use std::sync::Arc;

use tracing::info;

use crate::config::RiskSettings;
use crate::models::ProtocolRiskAssessment;
use crate::providers::{ContractVerificationProvider, YieldDataProvider};
use crate::risk::{
    generate_recommendations, CompositeRiskScorer, ContractRiskEvaluator, GovernanceEvaluator, RiskError,
    RiskFactorKind, RiskFactorMap, TvlRiskEvaluator,
};
use crate::services::ReportAssembler;

/// Full multi-factor assessment of a single protocol.
///
/// TVL, governance and contract verification are looked up concurrently.
/// A failed lookup degrades its factor to the neutral score; it never fails
/// the assessment.
pub struct ProtocolRiskAssessor {
    yield_data: Arc<dyn YieldDataProvider>,
    verification: Arc<dyn ContractVerificationProvider>,
    governance: Arc<dyn GovernanceEvaluator>,
    tvl_evaluator: TvlRiskEvaluator,
    contract_evaluator: ContractRiskEvaluator,
    scorer: CompositeRiskScorer,
    assembler: ReportAssembler,
}

impl ProtocolRiskAssessor {
    pub fn new(
        yield_data: Arc<dyn YieldDataProvider>,
        verification: Arc<dyn ContractVerificationProvider>,
        governance: Arc<dyn GovernanceEvaluator>,
        settings: &RiskSettings,
    ) -> Self {
        Self {
            yield_data,
            verification,
            governance,
            tvl_evaluator: TvlRiskEvaluator::new(settings.tvl.clone()),
            contract_evaluator: ContractRiskEvaluator::new(settings.contract.clone()),
            scorer: CompositeRiskScorer::new(),
            assembler: ReportAssembler::new(),
        }
    }

    pub async fn assess_protocol_risk(
        &self,
        protocol_name: &str,
        contract_address: Option<&str>,
    ) -> Result<ProtocolRiskAssessment, RiskError> {
        let protocol_name = protocol_name.trim();
        if protocol_name.is_empty() {
            return Err(RiskError::invalid_input("protocol name must not be empty"));
        }
        let contract_address = contract_address.map(str::trim).filter(|address| !address.is_empty());

        info!(
            protocol = %protocol_name,
            contract = contract_address.unwrap_or("none"),
            governance = self.governance.name(),
            "Assessing protocol risk"
        );

        let contract_lookup = async {
            match contract_address {
                Some(address) => Some(self.verification.is_source_verified(address).await),
                None => None,
            }
        };

        let (tvl_lookup, governance_result, contract_lookup) = futures::join!(
            self.yield_data.fetch_protocol_tvl(protocol_name),
            self.governance.evaluate(protocol_name),
            contract_lookup
        );

        let mut factors = RiskFactorMap::new();
        factors.insert(RiskFactorKind::Tvl, self.tvl_evaluator.evaluate_lookup(tvl_lookup));
        factors.insert(RiskFactorKind::Governance, governance_result);
        if let Some(lookup) = contract_lookup {
            factors.insert(RiskFactorKind::Contract, self.contract_evaluator.evaluate(lookup));
        }

        let assessment = self.scorer.assess(factors);
        let recommendations = generate_recommendations(assessment.composite_score(), assessment.per_factor_results());

        info!(
            protocol = %protocol_name,
            composite_score = %assessment.composite_score(),
            risk_level = %assessment.risk_level(),
            degraded = assessment.is_degraded(),
            "Protocol risk assessed"
        );

        Ok(self
            .assembler
            .protocol_assessment(protocol_name, contract_address, &assessment, &recommendations))
    }
}
