use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ProviderSettings;
use crate::providers::http::{check_status, read_json, transport_error};
use crate::providers::{ContractVerificationProvider, ProviderError};

const SERVICE: &str = "etherscan";

/// Etherscan `getsourcecode` lookups
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EtherscanClient {
    pub fn new(client: Client, settings: &ProviderSettings) -> Self {
        Self::with_base_url(client, &settings.etherscan_api_url, settings.etherscan_api_key.clone())
    }

    pub fn with_base_url(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }
}

/// Verified iff the first result carries non-empty `SourceCode`.
/// A string `result` is Etherscan's error channel (bad key, rate limit).
pub fn parse_verification(body: &Value) -> Result<bool, ProviderError> {
    match body.get("result") {
        Some(Value::Array(entries)) => match entries.first() {
            Some(entry) => Ok(entry
                .get("SourceCode")
                .and_then(Value::as_str)
                .map_or(false, |source| !source.trim().is_empty())),
            None => Err(ProviderError::InvalidResponse {
                service: SERVICE,
                message: "empty result".to_string(),
            }),
        },
        Some(Value::String(message)) => Err(ProviderError::InvalidResponse {
            service: SERVICE,
            message: message.clone(),
        }),
        _ => Err(ProviderError::InvalidResponse {
            service: SERVICE,
            message: "missing result".to_string(),
        }),
    }
}

#[async_trait]
impl ContractVerificationProvider for EtherscanClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn is_source_verified(&self, contract_address: &str) -> Result<bool, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| ProviderError::NotConfigured {
            service: SERVICE,
            message: "API key is not set".to_string(),
        })?;

        debug!(address = %contract_address, "Checking contract verification");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("module", "contract"),
                ("action", "getsourcecode"),
                ("address", contract_address),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let response = check_status(SERVICE, response)?;
        let body = read_json(SERVICE, response).await?;
        parse_verification(&body)
    }
}
