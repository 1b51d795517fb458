use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::ProviderSettings;
use crate::providers::http::{read_json, transport_error, value_as_f64};
use crate::providers::{ProviderError, TokenPriceProvider};

const SERVICE: &str = "coingecko";
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// CoinGecko on-chain network id for a chain name
pub fn network_for_chain(chain: &str) -> Option<&'static str> {
    match chain.trim().to_lowercase().as_str() {
        "ethereum" => Some("ethereum"),
        "arbitrum" => Some("arbitrum-one"),
        "base" => Some("base"),
        "polygon" => Some("polygon-pos"),
        "optimism" => Some("optimistic-ethereum"),
        _ => None,
    }
}

/// Token prices from the CoinGecko pro on-chain API.
///
/// Without an API key every lookup resolves to `Ok(None)` without a request.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(client: Client, settings: &ProviderSettings) -> Self {
        Self::with_base_url(client, &settings.coingecko_api_url, settings.coingecko_api_key.clone())
    }

    pub fn with_base_url(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Price for `address`, matched case-insensitively, from either
/// `data.attributes.token_prices` or a top-level `{address: {usd}}` map
pub fn extract_token_price(body: &Value, address: &str) -> Option<f64> {
    let find = |map: &serde_json::Map<String, Value>| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(address))
            .map(|(_, value)| value.clone())
    };

    if let Some(prices) = body.pointer("/data/attributes/token_prices").and_then(Value::as_object) {
        if let Some(price) = find(prices).as_ref().and_then(value_as_f64) {
            return Some(price);
        }
    }

    body.as_object()
        .and_then(|map| find(map))
        .and_then(|entry| entry.get("usd").and_then(value_as_f64))
}

#[async_trait]
impl TokenPriceProvider for CoinGeckoClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn token_price(&self, chain: &str, token_address: &str) -> Result<Option<f64>, ProviderError> {
        let token_address = token_address.trim();
        if token_address.is_empty() {
            return Ok(None);
        }
        let network = match network_for_chain(chain) {
            Some(network) => network,
            None => {
                debug!(chain = %chain, "Chain not supported for price lookup");
                return Ok(None);
            }
        };
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Ok(None),
        };

        let url = format!(
            "{}/onchain/simple/networks/{}/token_price/{}",
            self.base_url, network, token_address
        );

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if response.status() != StatusCode::OK {
            debug!(
                chain = %chain,
                token = %token_address,
                status = response.status().as_u16(),
                "Price lookup returned no data"
            );
            return Ok(None);
        }

        let body = read_json(SERVICE, response).await?;
        Ok(extract_token_price(&body, token_address))
    }
}
