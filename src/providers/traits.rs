use async_trait::async_trait;

use crate::models::RawYieldRecord;

/// Common error type for all external data providers
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{service} request failed: {message}")]
    Http { service: &'static str, message: String },

    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} rate limit exceeded")]
    RateLimited { service: &'static str },

    #[error("{service} returned an invalid response: {message}")]
    InvalidResponse { service: &'static str, message: String },

    #[error("{service} is not configured: {message}")]
    NotConfigured { service: &'static str, message: String },
}

impl ProviderError {
    pub fn service(&self) -> &'static str {
        match self {
            ProviderError::Http { service, .. }
            | ProviderError::Status { service, .. }
            | ProviderError::RateLimited { service }
            | ProviderError::InvalidResponse { service, .. }
            | ProviderError::NotConfigured { service, .. } => *service,
        }
    }
}

/// Source of pool and protocol listings
#[async_trait]
pub trait YieldDataProvider: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &'static str;

    /// Every protocol the provider lists, unfiltered
    async fn fetch_protocols(&self) -> Result<Vec<RawYieldRecord>, ProviderError>;

    /// Pools, narrowed by chain, project and stablecoin flag.
    /// Empty `chains` and `None` projects disable the respective filter.
    async fn fetch_pools(
        &self,
        chains: &[String],
        projects: Option<&[String]>,
        stablecoin_only: bool,
    ) -> Result<Vec<RawYieldRecord>, ProviderError>;

    /// Current TVL of one protocol; `Ok(None)` when the payload carries no TVL
    async fn fetch_protocol_tvl(&self, protocol_name: &str) -> Result<Option<f64>, ProviderError>;
}

/// Best-effort USD token prices
#[async_trait]
pub trait TokenPriceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` when the chain is unsupported, no key is configured or the
    /// price is simply not known
    async fn token_price(&self, chain: &str, token_address: &str) -> Result<Option<f64>, ProviderError>;
}

/// Block explorer source-verification lookups
#[async_trait]
pub trait ContractVerificationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn is_source_verified(&self, contract_address: &str) -> Result<bool, ProviderError>;
}
