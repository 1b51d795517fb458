use std::sync::Arc;
use tracing::{debug, info};

use crate::models::{RankingMetric, RawYieldRecord, ScoutQuery, YieldOpportunity};
use crate::ranking::YieldFilter;
use crate::risk::PoolRiskScorer;

/// Filtered, ranked and capped opportunities
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOpportunities {
    pub opportunities: Vec<YieldOpportunity>,
    /// Records that passed every filter, before truncation
    pub total_candidates: usize,
}

/// Filters raw records against a query and ranks them by one metric.
///
/// The ranking is a stable descending sort, so records with equal keys keep
/// their fetch order and identical inputs always yield identical output.
#[derive(Clone)]
pub struct YieldOpportunityRanker {
    scorer: Arc<dyn PoolRiskScorer>,
    metric: RankingMetric,
}

impl YieldOpportunityRanker {
    pub fn new(scorer: Arc<dyn PoolRiskScorer>, metric: RankingMetric) -> Self {
        Self { scorer, metric }
    }

    pub fn metric(&self) -> RankingMetric {
        self.metric
    }

    /// Records passing every filter, in input order
    pub fn filter(&self, records: &[RawYieldRecord], query: &ScoutQuery) -> Vec<RawYieldRecord> {
        let filter = YieldFilter::from_query(query);

        records
            .iter()
            .filter(|record| filter.matches_record(record) && filter.accepts_risk(self.scorer.score(record)))
            .cloned()
            .collect()
    }

    pub fn rank(&self, records: &[RawYieldRecord], query: &ScoutQuery) -> RankedOpportunities {
        let filter = YieldFilter::from_query(query);
        let max_results = query.effective().max_results;

        let mut opportunities: Vec<YieldOpportunity> = records
            .iter()
            .filter(|record| filter.matches_record(record))
            .filter_map(|record| {
                let risk_score = self.scorer.score(record);
                if filter.accepts_risk(risk_score) {
                    Some(YieldOpportunity::from_record(record, risk_score, self.metric))
                } else {
                    debug!(
                        protocol = %record.subject_name(),
                        risk_score = %risk_score,
                        "Record exceeds maximum risk score"
                    );
                    None
                }
            })
            .collect();

        // sort_by is stable: equal keys keep input order
        opportunities.sort_by(|a, b| b.risk_adjusted_metric.total_cmp(&a.risk_adjusted_metric));

        let total_candidates = opportunities.len();
        opportunities.truncate(max_results);

        info!(
            input_records = records.len(),
            total_candidates = total_candidates,
            returned = opportunities.len(),
            metric = %self.metric,
            scorer = self.scorer.name(),
            "Ranked yield opportunities"
        );

        RankedOpportunities {
            opportunities,
            total_candidates,
        }
    }
}
