use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{RiskSettings, ScoutSettings};
use crate::models::{AnalysisReport, RankingMetric, ScoutQuery};
use crate::providers::YieldDataProvider;
use crate::ranking::YieldOpportunityRanker;
use crate::risk::{RiskError, TvlTierScorer};
use crate::services::ReportAssembler;

/// Ranks whole protocols by risk-adjusted APY
pub struct YieldAnalyzer {
    yield_data: Arc<dyn YieldDataProvider>,
    ranker: YieldOpportunityRanker,
    settings: ScoutSettings,
    assembler: ReportAssembler,
}

impl YieldAnalyzer {
    pub fn new(yield_data: Arc<dyn YieldDataProvider>, risk: &RiskSettings, settings: &ScoutSettings) -> Self {
        let scorer = Arc::new(TvlTierScorer::new(risk.pool_tiers.clone()));
        Self {
            yield_data,
            ranker: YieldOpportunityRanker::new(scorer, RankingMetric::RiskAdjustedApy),
            settings: settings.clone(),
            assembler: ReportAssembler::new(),
        }
    }

    /// Query for the given thresholds. Protocols are not filtered by TVL
    /// here; small protocols only carry a higher risk score.
    pub fn query_for(&self, chains: Option<Vec<String>>, min_apy: f64, max_risk_score: f64) -> ScoutQuery {
        ScoutQuery {
            chains: chains.unwrap_or_else(|| self.settings.default_chains.clone()),
            min_tvl_usd: 0.0,
            min_apy,
            max_apy: self.settings.max_apy_threshold,
            max_risk_score,
            include_projects: None,
            symbols: None,
            stablecoin_only: false,
            max_results: self.settings.analysis_max_results,
        }
    }

    /// `None` chains fall back to the configured default chains
    pub async fn analyze_yield_opportunities(
        &self,
        chains: Option<Vec<String>>,
        min_apy: f64,
        max_risk_score: f64,
    ) -> Result<AnalysisReport, RiskError> {
        let query = self.query_for(chains, min_apy, max_risk_score);
        self.analyze(&query).await
    }

    pub async fn analyze(&self, query: &ScoutQuery) -> Result<AnalysisReport, RiskError> {
        for issue in query.validate() {
            warn!(issue = %issue, "Query adjusted");
        }

        let mut notes = Vec::new();
        // One listing serves every requested chain
        let protocols = match self.yield_data.fetch_protocols().await {
            Ok(protocols) => protocols,
            Err(e) => {
                warn!(provider = self.yield_data.name(), error = %e, "Protocol list unavailable");
                notes.push(format!("Protocol list unavailable: {}", e));
                Vec::new()
            }
        };

        let ranked = self.ranker.rank(&protocols, query);

        info!(
            chains = ?query.effective().chains,
            total_opportunities = ranked.total_candidates,
            returned = ranked.opportunities.len(),
            "Yield analysis complete"
        );

        Ok(self
            .assembler
            .analysis_report(query, &ranked.opportunities, ranked.total_candidates, &notes))
    }
}
