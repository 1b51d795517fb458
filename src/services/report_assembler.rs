use chrono::Utc;

use crate::models::{AnalysisReport, ProtocolRiskAssessment, ScoutQuery, ScoutResult, YieldOpportunity};
use crate::risk::CompositeRiskAssessment;

pub const SCOUT_NOTES: &str = "Source: DefiLlama Yields. Prices (best-effort) via CoinGecko.";
pub const ANALYSIS_NOTES: &str =
    "Source: DefiLlama protocols. Risk from TVL tiers, ranked by risk-adjusted APY.";

/// Packages ranked results into the immutable report records
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn scout_result(
        &self,
        query: &ScoutQuery,
        pools: &[YieldOpportunity],
        total_candidates: usize,
        extra_notes: &[String],
    ) -> ScoutResult {
        ScoutResult {
            input: query.clone(),
            pools: pools.to_vec(),
            total_candidates,
            notes: join_notes(SCOUT_NOTES, extra_notes),
            generated_at: Utc::now(),
        }
    }

    pub fn analysis_report(
        &self,
        query: &ScoutQuery,
        opportunities: &[YieldOpportunity],
        total_opportunities: usize,
        extra_notes: &[String],
    ) -> AnalysisReport {
        AnalysisReport {
            chains_analyzed: query.effective().chains,
            input: query.clone(),
            total_opportunities,
            opportunities: opportunities.to_vec(),
            notes: join_notes(ANALYSIS_NOTES, extra_notes),
            analysis_timestamp: Utc::now(),
        }
    }

    pub fn protocol_assessment(
        &self,
        protocol: &str,
        contract_address: Option<&str>,
        assessment: &CompositeRiskAssessment,
        recommendations: &[String],
    ) -> ProtocolRiskAssessment {
        ProtocolRiskAssessment {
            protocol: protocol.to_string(),
            contract_address: contract_address.map(str::to_string),
            risk_level: assessment.risk_level(),
            composite_risk_score: assessment.composite_score(),
            risk_factors: assessment.per_factor_results().clone(),
            recommendations: recommendations.to_vec(),
            degraded: assessment.is_degraded(),
            assessment_timestamp: Utc::now(),
        }
    }
}

fn join_notes(base: &str, extra: &[String]) -> String {
    std::iter::once(base)
        .chain(extra.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
