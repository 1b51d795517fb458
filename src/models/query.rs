use serde::{Deserialize, Serialize};

use crate::config::ScoutSettings;
use crate::risk::{MAX_RISK_SCORE, MIN_RISK_SCORE};

/// Parameters of a ranking request.
///
/// Construction never fails. `validate` reports out-of-range values and
/// `effective` clamps them before any filtering happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutQuery {
    pub chains: Vec<String>,
    pub min_tvl_usd: f64,
    pub min_apy: f64,
    pub max_apy: f64,
    pub max_risk_score: f64,
    pub include_projects: Option<Vec<String>>,
    pub symbols: Option<Vec<String>>,
    pub stablecoin_only: bool,
    pub max_results: usize,
}

pub const DEFAULT_MAX_APY: f64 = 1000.0;
pub const DEFAULT_MAX_RISK_SCORE: f64 = 7.0;
pub const DEFAULT_MAX_POOLS: usize = 25;

impl Default for ScoutQuery {
    fn default() -> Self {
        Self {
            chains: vec!["ethereum".to_string(), "base".to_string(), "arbitrum".to_string()],
            min_tvl_usd: 1_000_000.0,
            min_apy: 0.0,
            max_apy: DEFAULT_MAX_APY,
            max_risk_score: DEFAULT_MAX_RISK_SCORE,
            include_projects: None,
            symbols: None,
            stablecoin_only: false,
            max_results: DEFAULT_MAX_POOLS,
        }
    }
}

impl ScoutQuery {
    /// Build the default query from configuration
    pub fn from_settings(settings: &ScoutSettings) -> Self {
        Self {
            chains: settings.default_chains.clone(),
            min_tvl_usd: settings.min_tvl_threshold,
            min_apy: settings.min_apy,
            max_apy: settings.max_apy_threshold,
            max_risk_score: settings.effective_max_risk_score(),
            include_projects: None,
            symbols: None,
            stablecoin_only: settings.stablecoin_only,
            max_results: settings.max_pools,
        }
    }

    /// Advisory checks; an empty list means the query is used as given
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(MIN_RISK_SCORE..=MAX_RISK_SCORE).contains(&self.max_risk_score) {
            issues.push(format!(
                "max_risk_score {} is outside [{}, {}] and will be clamped",
                self.max_risk_score, MIN_RISK_SCORE, MAX_RISK_SCORE
            ));
        }
        if !(self.min_tvl_usd >= 0.0) {
            issues.push(format!("min_tvl_usd {} will be treated as 0", self.min_tvl_usd));
        }
        if !(self.min_apy >= 0.0) {
            issues.push(format!("min_apy {} will be treated as 0", self.min_apy));
        }
        if self.max_apy < self.min_apy {
            issues.push(format!(
                "max_apy {} is below min_apy {}; no record can match",
                self.max_apy, self.min_apy
            ));
        }
        if self.max_results == 0 {
            issues.push("max_results 0 will be raised to 1".to_string());
        }
        if self.chains.iter().any(|chain| chain.trim().is_empty()) {
            issues.push("chains contains an empty entry".to_string());
        }

        issues
    }

    /// Copy of the query with every threshold clamped into its valid range
    pub fn effective(&self) -> Self {
        let max_risk_score = if self.max_risk_score.is_nan() {
            DEFAULT_MAX_RISK_SCORE
        } else {
            self.max_risk_score.max(MIN_RISK_SCORE).min(MAX_RISK_SCORE)
        };
        let max_apy = if self.max_apy.is_nan() {
            DEFAULT_MAX_APY
        } else {
            self.max_apy.max(0.0)
        };

        Self {
            chains: self
                .chains
                .iter()
                .map(|chain| chain.trim().to_string())
                .filter(|chain| !chain.is_empty())
                .collect(),
            min_tvl_usd: if self.min_tvl_usd >= 0.0 { self.min_tvl_usd } else { 0.0 },
            min_apy: if self.min_apy >= 0.0 { self.min_apy } else { 0.0 },
            max_apy,
            max_risk_score,
            include_projects: self.include_projects.clone(),
            symbols: self.symbols.clone(),
            stablecoin_only: self.stablecoin_only,
            max_results: self.max_results.max(1),
        }
    }
}
