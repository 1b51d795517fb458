use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::RawYieldRecord;
use crate::utils::math::{log10_tvl, non_negative};

/// Formula used to rank opportunities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    /// `apy * (1 - (risk - 1) * 0.1)`
    RiskAdjustedApy,
    /// `apy * log10(tvl + 1) / (1 + risk)`
    TvlWeighted,
}

impl RankingMetric {
    pub fn compute(&self, apy: f64, tvl_usd: f64, risk_score: f64) -> f64 {
        match self {
            RankingMetric::RiskAdjustedApy => {
                let risk_multiplier = 1.0 - (risk_score - 1.0) * 0.1;
                apy * risk_multiplier
            }
            // risk_score >= 1, so the denominator is at least 2
            RankingMetric::TvlWeighted => apy * log10_tvl(tvl_usd) / (1.0 + risk_score),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMetric::RiskAdjustedApy => "risk_adjusted_apy",
            RankingMetric::TvlWeighted => "tvl_weighted",
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked pool or protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldOpportunity {
    pub protocol: String,
    pub chain: String,
    pub pool: Option<String>,
    pub symbol: String,
    pub apy: f64,
    pub apy_base: Option<f64>,
    pub apy_reward: Option<f64>,
    pub tvl_usd: f64,
    pub stablecoin: bool,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub underlying_tokens: Vec<String>,
    pub risk_score: f64,
    pub risk_adjusted_metric: f64,
    pub ranking_metric: RankingMetric,
    pub price_usd: Option<f64>,
}

impl YieldOpportunity {
    pub fn from_record(record: &RawYieldRecord, risk_score: f64, metric: RankingMetric) -> Self {
        let apy = record.apy_or_zero();
        let tvl_usd = record.tvl_usd_or_zero();

        Self {
            protocol: record.subject_name().to_string(),
            chain: record.chain_name().to_string(),
            pool: record.pool.clone(),
            symbol: record.symbol_name().to_string(),
            apy,
            apy_base: record.apy_base.map(|v| non_negative(Some(v))),
            apy_reward: record.apy_reward.map(|v| non_negative(Some(v))),
            tvl_usd,
            stablecoin: record.is_stablecoin(),
            url: record.url.clone(),
            underlying_tokens: record.underlying_tokens().to_vec(),
            risk_score,
            risk_adjusted_metric: metric.compute(apy, tvl_usd, risk_score),
            ranking_metric: metric,
            price_usd: None,
        }
    }

    pub fn with_price(self, price_usd: Option<f64>) -> Self {
        Self { price_usd, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_adjusted_apy_exactness() {
        let metric = RankingMetric::RiskAdjustedApy;
        assert_eq!(metric.compute(10.0, 0.0, 1.0), 10.0);
        assert!((metric.compute(10.0, 0.0, 10.0) - 1.0).abs() < 1e-12);
        assert!((metric.compute(50.0, 0.0, 7.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_tvl_weighted_rewards_scale() {
        let metric = RankingMetric::TvlWeighted;
        let small = metric.compute(10.0, 999.0, 1.0);
        let large = metric.compute(10.0, 999_999.0, 1.0);

        assert!((small - 15.0).abs() < 1e-9);
        assert!((large - 30.0).abs() < 1e-9);
        assert_eq!(metric.compute(10.0, 0.0, 3.0), 0.0);
    }

    #[test]
    fn test_opportunity_from_record() {
        let record = RawYieldRecord {
            project: Some("curve-dex".to_string()),
            chain: Some("Ethereum".to_string()),
            symbol: Some("DAI-USDC-USDT".to_string()),
            tvl_usd: Some(200_000_000.0),
            apy: Some(12.0),
            ..Default::default()
        };

        let opportunity = YieldOpportunity::from_record(&record, 4.0, RankingMetric::RiskAdjustedApy);
        assert_eq!(opportunity.protocol, "curve-dex");
        assert!((opportunity.risk_adjusted_metric - 8.4).abs() < 1e-12);
        assert_eq!(opportunity.price_usd, None);

        let priced = opportunity.with_price(Some(1.0));
        assert_eq!(priced.price_usd, Some(1.0));
    }
}
