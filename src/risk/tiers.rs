// Lightweight single-pass risk scoring for ranking pools and protocols
use serde::{Deserialize, Serialize};

use crate::models::RawYieldRecord;
use crate::risk::DEFAULT_RISK_SCORE;
use crate::utils::math::clamp_score;

/// Per-record risk score used by the ranking pipelines
pub trait PoolRiskScorer: Send + Sync {
    fn score(&self, record: &RawYieldRecord) -> f64;

    fn name(&self) -> &'static str;
}

/// TVL tiers for the lightweight scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvlTierConfig {
    pub very_large_tvl_usd: f64,
    pub very_large_bonus: f64,
    pub large_tvl_usd: f64,
    pub large_bonus: f64,
    pub small_tvl_usd: f64,
    pub small_penalty: f64,
}

impl Default for TvlTierConfig {
    fn default() -> Self {
        Self {
            very_large_tvl_usd: 1_000_000_000.0,
            very_large_bonus: 2.0,
            large_tvl_usd: 100_000_000.0,
            large_bonus: 1.0,
            small_tvl_usd: 10_000_000.0,
            small_penalty: 2.0,
        }
    }
}

/// Scores a record from its TVL alone: base 5.0, adjusted by tier
#[derive(Debug, Clone, Default)]
pub struct TvlTierScorer {
    config: TvlTierConfig,
}

impl TvlTierScorer {
    pub fn new(config: TvlTierConfig) -> Self {
        Self { config }
    }

    pub fn score_tvl(&self, tvl: f64) -> f64 {
        let mut risk_score = DEFAULT_RISK_SCORE;

        // Tiers are exclusive; the largest matching tier wins
        if tvl > self.config.very_large_tvl_usd {
            risk_score -= self.config.very_large_bonus;
        } else if tvl > self.config.large_tvl_usd {
            risk_score -= self.config.large_bonus;
        } else if tvl < self.config.small_tvl_usd {
            risk_score += self.config.small_penalty;
        }

        clamp_score(risk_score)
    }
}

impl PoolRiskScorer for TvlTierScorer {
    fn score(&self, record: &RawYieldRecord) -> f64 {
        self.score_tvl(record.tvl_usd_or_zero())
    }

    fn name(&self) -> &'static str {
        "tvl_tier"
    }
}
