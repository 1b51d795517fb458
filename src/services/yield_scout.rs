use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::RiskSettings;
use crate::models::{RankingMetric, ScoutQuery, ScoutResult, YieldOpportunity};
use crate::providers::{TokenPriceProvider, YieldDataProvider};
use crate::ranking::YieldOpportunityRanker;
use crate::risk::{RiskError, TvlTierScorer};
use crate::services::ReportAssembler;

/// Pool scouting: fetch, filter, rank by TVL-weighted score, then attach
/// best-effort token prices to the capped list
pub struct YieldScout {
    yield_data: Arc<dyn YieldDataProvider>,
    prices: Arc<dyn TokenPriceProvider>,
    ranker: YieldOpportunityRanker,
    assembler: ReportAssembler,
}

impl YieldScout {
    pub fn new(
        yield_data: Arc<dyn YieldDataProvider>,
        prices: Arc<dyn TokenPriceProvider>,
        risk: &RiskSettings,
    ) -> Self {
        let scorer = Arc::new(TvlTierScorer::new(risk.pool_tiers.clone()));
        Self {
            yield_data,
            prices,
            ranker: YieldOpportunityRanker::new(scorer, RankingMetric::TvlWeighted),
            assembler: ReportAssembler::new(),
        }
    }

    pub async fn run(&self, query: &ScoutQuery) -> Result<ScoutResult, RiskError> {
        for issue in query.validate() {
            warn!(issue = %issue, "Query adjusted");
        }
        let effective = query.effective();

        info!(
            chains = ?effective.chains,
            min_tvl_usd = %effective.min_tvl_usd,
            max_risk_score = %effective.max_risk_score,
            max_results = effective.max_results,
            "Scouting yield pools"
        );

        let mut notes = Vec::new();
        let pools = match self
            .yield_data
            .fetch_pools(
                &effective.chains,
                effective.include_projects.as_deref(),
                effective.stablecoin_only,
            )
            .await
        {
            Ok(pools) => pools,
            Err(e) => {
                warn!(provider = self.yield_data.name(), error = %e, "Pool list unavailable");
                notes.push(format!("Pool list unavailable: {}", e));
                Vec::new()
            }
        };

        let ranked = self.ranker.rank(&pools, query);
        let enriched = self.enrich_prices(ranked.opportunities).await?;

        info!(
            total_candidates = ranked.total_candidates,
            returned = enriched.len(),
            priced = enriched.iter().filter(|pool| pool.price_usd.is_some()).count(),
            "Yield scouting complete"
        );

        Ok(self
            .assembler
            .scout_result(query, &enriched, ranked.total_candidates, &notes))
    }

    /// One task per pool with an underlying token; each task writes only its
    /// own slot. Lookup failures leave the slot empty, a panicked task fails
    /// the whole run.
    async fn enrich_prices(&self, pools: Vec<YieldOpportunity>) -> Result<Vec<YieldOpportunity>, RiskError> {
        let mut prices: Vec<Option<f64>> = vec![None; pools.len()];
        let mut tasks = JoinSet::new();

        for (index, pool) in pools.iter().enumerate() {
            let token = match pool.underlying_tokens.first() {
                Some(token) => token.clone(),
                None => continue,
            };
            let chain = pool.chain.clone();
            let provider = Arc::clone(&self.prices);

            tasks.spawn(async move {
                let price = match provider.token_price(&chain, &token).await {
                    Ok(price) => price,
                    Err(e) => {
                        debug!(chain = %chain, token = %token, error = %e, "Price lookup failed");
                        None
                    }
                };
                (index, price)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (index, price) =
                joined.map_err(|e| RiskError::internal(format!("Price enrichment task failed: {}", e)))?;
            prices[index] = price;
        }

        Ok(pools
            .into_iter()
            .zip(prices)
            .map(|(pool, price)| pool.with_price(price))
            .collect())
    }
}
