use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ProviderSettings;
use crate::models::RawYieldRecord;
use crate::providers::http::{check_status, read_json, transport_error, value_as_f64};
use crate::providers::{ProviderError, YieldDataProvider};

const SERVICE: &str = "defillama";

/// `currentChainTvls` keys that are not chain totals
const NON_CHAIN_TVL_KEYS: [&str; 7] = [
    "staking",
    "pool2",
    "borrowed",
    "doublecounted",
    "liquidstaking",
    "vesting",
    "offers",
];

/// DefiLlama TVL and yields API client
#[derive(Debug, Clone)]
pub struct DefiLlamaClient {
    client: Client,
    api_url: String,
    yields_url: String,
}

impl DefiLlamaClient {
    pub fn new(client: Client, settings: &ProviderSettings) -> Self {
        Self::with_urls(client, &settings.defillama_api_url, &settings.defillama_yields_url)
    }

    pub fn with_urls(client: Client, api_url: &str, yields_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            yields_url: yields_url.to_string(),
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, ProviderError> {
        debug!(url = %url, "Requesting DefiLlama");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let response = check_status(SERVICE, response)?;
        read_json(SERVICE, response).await
    }
}

/// DefiLlama protocol slug: lower case, spaces replaced by dashes
pub fn protocol_slug(protocol_name: &str) -> String {
    protocol_name.trim().to_lowercase().replace(' ', "-")
}

/// Decode records one by one so a single malformed entry does not void the list
fn decode_records(values: Vec<Value>) -> Vec<RawYieldRecord> {
    let total = values.len();
    let records: Vec<RawYieldRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index = index, error = %e, "Skipping undecodable DefiLlama record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(decoded = records.len(), total = total, "Some DefiLlama records were skipped");
    }
    records
}

/// The pools endpoint wraps its list in `data` or `pools`
fn pool_list(body: Value) -> Result<Vec<Value>, ProviderError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("pools")) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => Err(ProviderError::InvalidResponse {
                service: SERVICE,
                message: "pool list is not an array".to_string(),
            }),
        },
        _ => Err(ProviderError::InvalidResponse {
            service: SERVICE,
            message: "unexpected pools payload".to_string(),
        }),
    }
}

/// Current TVL from a `/protocol/{slug}` payload.
///
/// `tvl` is either a number or a historical series whose last point holds
/// `totalLiquidityUSD`. Without it the per-chain totals are summed.
pub fn extract_protocol_tvl(body: &Value) -> Option<f64> {
    match body.get("tvl") {
        Some(Value::Array(series)) => {
            if let Some(tvl) = series.last().and_then(|point| point.get("totalLiquidityUSD")).and_then(value_as_f64) {
                return Some(tvl);
            }
        }
        Some(value) => {
            if let Some(tvl) = value_as_f64(value) {
                return Some(tvl);
            }
        }
        None => {}
    }

    let chain_tvls = body.get("currentChainTvls")?.as_object()?;
    let totals: Vec<f64> = chain_tvls
        .iter()
        .filter(|(key, _)| {
            let key = key.to_lowercase();
            !key.contains('-') && !NON_CHAIN_TVL_KEYS.contains(&key.as_str())
        })
        .filter_map(|(_, value)| value_as_f64(value))
        .collect();

    if totals.is_empty() {
        None
    } else {
        Some(totals.iter().sum())
    }
}

fn lowercase_set(values: &[String]) -> HashSet<String> {
    values.iter().map(|v| v.trim().to_lowercase()).collect()
}

#[async_trait]
impl YieldDataProvider for DefiLlamaClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn fetch_protocols(&self) -> Result<Vec<RawYieldRecord>, ProviderError> {
        let url = format!("{}/protocols", self.api_url);
        let body = self.get_json(&url).await?;

        let items = match body {
            Value::Array(items) => items,
            _ => {
                return Err(ProviderError::InvalidResponse {
                    service: SERVICE,
                    message: "protocol list is not an array".to_string(),
                })
            }
        };

        let records = decode_records(items);
        info!(protocols = records.len(), "Fetched DefiLlama protocols");
        Ok(records)
    }

    async fn fetch_pools(
        &self,
        chains: &[String],
        projects: Option<&[String]>,
        stablecoin_only: bool,
    ) -> Result<Vec<RawYieldRecord>, ProviderError> {
        let body = self.get_json(&self.yields_url).await?;
        let records = decode_records(pool_list(body)?);
        let fetched = records.len();

        let chains = lowercase_set(chains);
        let projects = projects.map(lowercase_set).filter(|set| !set.is_empty());

        let pools: Vec<RawYieldRecord> = records
            .into_iter()
            .filter(|record| chains.is_empty() || chains.contains(&record.chain_name().to_lowercase()))
            .filter(|record| {
                projects.as_ref().map_or(true, |projects| {
                    projects.contains(&record.project.as_deref().unwrap_or_default().to_lowercase())
                })
            })
            .filter(|record| !stablecoin_only || record.is_stablecoin())
            .collect();

        info!(fetched = fetched, matched = pools.len(), "Fetched DefiLlama pools");
        Ok(pools)
    }

    async fn fetch_protocol_tvl(&self, protocol_name: &str) -> Result<Option<f64>, ProviderError> {
        let url = format!("{}/protocol/{}", self.api_url, protocol_slug(protocol_name));
        let body = self.get_json(&url).await?;

        let tvl = extract_protocol_tvl(&body);
        if tvl.is_none() {
            debug!(protocol = %protocol_name, "DefiLlama payload has no TVL");
        }
        Ok(tvl)
    }
}
