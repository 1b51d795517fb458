use std::collections::HashSet;

use crate::models::{RawYieldRecord, ScoutQuery};

/// Compiled form of a query's record filters.
///
/// Allow-lists are matched case-insensitively; an empty or absent list
/// disables that filter.
#[derive(Debug, Clone)]
pub struct YieldFilter {
    chains: Option<HashSet<String>>,
    projects: Option<HashSet<String>>,
    symbols: Option<HashSet<String>>,
    stablecoin_only: bool,
    min_tvl_usd: f64,
    min_apy: f64,
    max_apy: f64,
    max_risk_score: f64,
}

fn lowercase_set<'a>(values: impl IntoIterator<Item = &'a String>) -> Option<HashSet<String>> {
    let set: HashSet<String> = values
        .into_iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect();

    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

impl YieldFilter {
    pub fn from_query(query: &ScoutQuery) -> Self {
        let query = query.effective();

        Self {
            chains: lowercase_set(&query.chains),
            projects: query.include_projects.as_ref().and_then(|projects| lowercase_set(projects)),
            symbols: query.symbols.as_ref().and_then(|symbols| lowercase_set(symbols)),
            stablecoin_only: query.stablecoin_only,
            min_tvl_usd: query.min_tvl_usd,
            min_apy: query.min_apy,
            max_apy: query.max_apy,
            max_risk_score: query.max_risk_score,
        }
    }

    /// Checks that do not depend on the risk score
    pub fn matches_record(&self, record: &RawYieldRecord) -> bool {
        if let Some(chains) = &self.chains {
            if !chains.contains(&record.chain_name().to_lowercase()) {
                return false;
            }
        }
        if let Some(projects) = &self.projects {
            if !projects.contains(&record.subject_name().to_lowercase()) {
                return false;
            }
        }
        if let Some(symbols) = &self.symbols {
            if !symbols.contains(&record.symbol_name().to_lowercase()) {
                return false;
            }
        }
        if self.stablecoin_only && !record.is_stablecoin() {
            return false;
        }

        let apy = record.apy_or_zero();
        record.tvl_usd_or_zero() >= self.min_tvl_usd && apy >= self.min_apy && apy <= self.max_apy
    }

    pub fn accepts_risk(&self, risk_score: f64) -> bool {
        risk_score <= self.max_risk_score
    }
}
