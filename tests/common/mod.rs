#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use defi_yield_scout::{
    models::RawYieldRecord,
    providers::{ContractVerificationProvider, ProviderError, TokenPriceProvider, YieldDataProvider},
};

pub fn pool(project: &str, chain: &str, symbol: &str, tvl_usd: f64, apy: f64) -> RawYieldRecord {
    RawYieldRecord {
        project: Some(project.to_string()),
        chain: Some(chain.to_string()),
        symbol: Some(symbol.to_string()),
        pool: Some(format!("{}-{}-{}", project, chain, symbol).to_lowercase()),
        tvl_usd: Some(tvl_usd),
        apy: Some(apy),
        ..Default::default()
    }
}

pub fn protocol(name: &str, chain: &str, tvl: f64, apy: f64) -> RawYieldRecord {
    RawYieldRecord {
        name: Some(name.to_string()),
        chain: Some(chain.to_string()),
        tvl: Some(tvl),
        apy: Some(apy),
        ..Default::default()
    }
}

pub fn with_token(mut record: RawYieldRecord, token: &str) -> RawYieldRecord {
    record.underlying_tokens = Some(vec![token.to_string()]);
    record
}

fn unavailable(service: &'static str) -> ProviderError {
    ProviderError::Status { service, status: 503 }
}

/// In-memory yield data; `tvl` keys are protocol names
#[derive(Debug, Clone, Default)]
pub struct StaticYieldData {
    pub protocols: Vec<RawYieldRecord>,
    pub pools: Vec<RawYieldRecord>,
    pub tvl: HashMap<String, f64>,
}

#[async_trait]
impl YieldDataProvider for StaticYieldData {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_protocols(&self) -> Result<Vec<RawYieldRecord>, ProviderError> {
        Ok(self.protocols.clone())
    }

    async fn fetch_pools(
        &self,
        _chains: &[String],
        _projects: Option<&[String]>,
        _stablecoin_only: bool,
    ) -> Result<Vec<RawYieldRecord>, ProviderError> {
        Ok(self.pools.clone())
    }

    async fn fetch_protocol_tvl(&self, protocol_name: &str) -> Result<Option<f64>, ProviderError> {
        Ok(self.tvl.get(protocol_name).copied())
    }
}

/// Every call fails with a 503
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingYieldData;

#[async_trait]
impl YieldDataProvider for FailingYieldData {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch_protocols(&self) -> Result<Vec<RawYieldRecord>, ProviderError> {
        Err(unavailable("defillama"))
    }

    async fn fetch_pools(
        &self,
        _chains: &[String],
        _projects: Option<&[String]>,
        _stablecoin_only: bool,
    ) -> Result<Vec<RawYieldRecord>, ProviderError> {
        Err(unavailable("defillama"))
    }

    async fn fetch_protocol_tvl(&self, _protocol_name: &str) -> Result<Option<f64>, ProviderError> {
        Err(unavailable("defillama"))
    }
}

/// Prices keyed by lower-case token address; `0xbroken` always errors
#[derive(Debug, Clone, Default)]
pub struct StaticPrices {
    pub prices: HashMap<String, f64>,
}

impl StaticPrices {
    pub fn with(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: prices.iter().map(|(token, price)| (token.to_lowercase(), *price)).collect(),
        }
    }
}

#[async_trait]
impl TokenPriceProvider for StaticPrices {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn token_price(&self, _chain: &str, token_address: &str) -> Result<Option<f64>, ProviderError> {
        if token_address == "0xbroken" {
            return Err(unavailable("coingecko"));
        }
        Ok(self.prices.get(&token_address.to_lowercase()).copied())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingPrices;

#[async_trait]
impl TokenPriceProvider for PanickingPrices {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn token_price(&self, _chain: &str, _token_address: &str) -> Result<Option<f64>, ProviderError> {
        panic!("price source exploded");
    }
}

#[derive(Debug, Clone, Copy)]
pub enum StaticVerification {
    Verified,
    NotVerified,
    Failing,
}

#[async_trait]
impl ContractVerificationProvider for StaticVerification {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn is_source_verified(&self, _contract_address: &str) -> Result<bool, ProviderError> {
        match self {
            StaticVerification::Verified => Ok(true),
            StaticVerification::NotVerified => Ok(false),
            StaticVerification::Failing => Err(unavailable("etherscan")),
        }
    }
}
