use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::risk::{ContractRiskConfig, TvlRiskConfig, TvlTierConfig};

pub const DEFAULT_CONFIG_FILE: &str = "config/default";
pub const ENV_PREFIX: &str = "SCOUT";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub providers: ProviderSettings,
    pub risk: RiskSettings,
    pub scout: ScoutSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub defillama_api_url: String,
    pub defillama_yields_url: String,
    pub coingecko_api_url: String,
    pub coingecko_api_key: Option<String>,
    pub etherscan_api_url: String,
    pub etherscan_api_key: Option<String>,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    pub tvl: TvlRiskConfig,
    pub contract: ContractRiskConfig,
    pub pool_tiers: TvlTierConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutSettings {
    pub default_chains: Vec<String>,
    pub min_tvl_threshold: f64,
    pub min_apy: f64,
    pub max_apy_threshold: f64,
    /// Explicit cap; when unset the risk tolerance decides
    pub max_risk_score: Option<f64>,
    pub risk_tolerance: String,
    pub max_pools: usize,
    pub analysis_max_results: usize,
    pub stablecoin_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            defillama_api_url: "https://api.llama.fi".to_string(),
            defillama_yields_url: "https://yields.llama.fi/pools".to_string(),
            coingecko_api_url: "https://pro-api.coingecko.com/api/v3".to_string(),
            coingecko_api_key: None,
            etherscan_api_url: "https://api.etherscan.io/api".to_string(),
            etherscan_api_key: None,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for ScoutSettings {
    fn default() -> Self {
        ScoutSettings {
            default_chains: vec![
                "ethereum".to_string(),
                "polygon".to_string(),
                "arbitrum".to_string(),
                "optimism".to_string(),
            ],
            min_tvl_threshold: 1_000_000.0,
            min_apy: 0.0,
            max_apy_threshold: 1000.0,
            max_risk_score: None,
            risk_tolerance: "medium".to_string(),
            max_pools: 25,
            analysis_max_results: 20,
            stablecoin_only: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl ScoutSettings {
    /// Max risk score implied by the tolerance: low 4, medium 7, high 9
    pub fn tolerance_max_risk_score(&self) -> Option<f64> {
        match self.risk_tolerance.trim().to_lowercase().as_str() {
            "low" => Some(4.0),
            "medium" => Some(7.0),
            "high" => Some(9.0),
            _ => None,
        }
    }

    pub fn effective_max_risk_score(&self) -> f64 {
        self.max_risk_score
            .or_else(|| self.tolerance_max_risk_score())
            .unwrap_or(crate::models::query::DEFAULT_MAX_RISK_SCORE)
    }
}

impl Settings {
    /// Defaults, then `config/default.toml` if present, then `SCOUT_*`
    /// variables, then the legacy flat variables
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Settings = Self::builder()?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(settings.with_legacy_env(|key| std::env::var(key).ok()))
    }

    /// Defaults overlaid with one required file; the environment is ignored
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from(path.as_ref()).required(true))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = Config::try_from(&Settings::default())?;
        Ok(Config::builder().add_source(defaults))
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("scout.default_chains")
    }

    /// Apply the flat variables older deployments set
    /// (`COINGECKO_API_KEY`, `DEFAULT_CHAINS`, `MAX_RISK_SCORE`, ...).
    /// Unparsable numbers are ignored.
    pub fn with_legacy_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = value("COINGECKO_API_KEY") {
            self.providers.coingecko_api_key = Some(key);
        }
        if let Some(key) = value("ETHERSCAN_API_KEY") {
            self.providers.etherscan_api_key = Some(key);
        }
        if let Some(timeout) = value("ANALYSIS_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.providers.request_timeout_seconds = timeout;
        }
        if let Some(chains) = value("DEFAULT_CHAINS") {
            let chains: Vec<String> = chains
                .split(',')
                .map(|chain| chain.trim().to_string())
                .filter(|chain| !chain.is_empty())
                .collect();
            if !chains.is_empty() {
                self.scout.default_chains = chains;
            }
        }
        if let Some(min_tvl) = value("MIN_TVL_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.scout.min_tvl_threshold = min_tvl;
        }
        if let Some(max_apy) = value("MAX_APY_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.scout.max_apy_threshold = max_apy;
        }
        if let Some(max_risk) = value("MAX_RISK_SCORE").and_then(|v| v.parse().ok()) {
            self.scout.max_risk_score = Some(max_risk);
        }
        if let Some(tolerance) = value("RISK_TOLERANCE") {
            self.scout.risk_tolerance = tolerance;
        }
        if let Some(level) = value("LOG_LEVEL") {
            self.logging.level = level;
        }

        self
    }
}
