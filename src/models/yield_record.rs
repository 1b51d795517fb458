use serde::{Deserialize, Serialize};

use crate::utils::math::non_negative;

/// A pool or protocol record as returned by the yield data provider.
///
/// Every field is optional; accessors treat absent numerics as zero and
/// absent flags as false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawYieldRecord {
    pub name: Option<String>,
    pub project: Option<String>,
    pub chain: Option<String>,
    pub symbol: Option<String>,
    pub pool: Option<String>,
    pub url: Option<String>,
    pub tvl: Option<f64>,
    pub tvl_usd: Option<f64>,
    pub apy: Option<f64>,
    pub apy_base: Option<f64>,
    pub apy_reward: Option<f64>,
    pub underlying_tokens: Option<Vec<String>>,
    pub stablecoin: Option<bool>,
}

impl RawYieldRecord {
    /// `tvlUsd` (yields API) takes precedence over `tvl` (protocols API)
    pub fn tvl_usd_or_zero(&self) -> f64 {
        non_negative(self.tvl_usd.or(self.tvl))
    }

    pub fn apy_or_zero(&self) -> f64 {
        non_negative(self.apy)
    }

    /// Pools carry `project`, protocols carry `name`
    pub fn subject_name(&self) -> &str {
        self.project
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    pub fn chain_name(&self) -> &str {
        self.chain.as_deref().unwrap_or("")
    }

    pub fn symbol_name(&self) -> &str {
        self.symbol.as_deref().unwrap_or("")
    }

    pub fn is_stablecoin(&self) -> bool {
        self.stablecoin.unwrap_or(false)
    }

    pub fn underlying_tokens(&self) -> &[String] {
        self.underlying_tokens.as_deref().unwrap_or(&[])
    }
}
