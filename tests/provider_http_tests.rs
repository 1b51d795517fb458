use defi_yield_scout::{
    config::ProviderSettings,
    providers::{
        build_http_client, CoinGeckoClient, ContractVerificationProvider, DefiLlamaClient, EtherscanClient,
        ProviderError, TokenPriceProvider, YieldDataProvider,
    },
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    build_http_client(&ProviderSettings {
        request_timeout_seconds: 5,
        ..ProviderSettings::default()
    })
    .unwrap()
}

fn llama(server: &MockServer) -> DefiLlamaClient {
    DefiLlamaClient::with_urls(client(), &server.uri(), &format!("{}/pools", server.uri()))
}

#[tokio::test]
async fn test_defillama_pools_filtered_client_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [
                {"project": "aave-v3", "chain": "Ethereum", "symbol": "USDC", "tvlUsd": 2e9, "apy": 5.1, "stablecoin": true},
                {"project": "aave-v3", "chain": "Polygon", "symbol": "USDC", "tvlUsd": 3e8, "apy": 4.0, "stablecoin": true},
                {"project": "lido", "chain": "Ethereum", "symbol": "STETH", "tvlUsd": 2e10, "apy": 3.2, "stablecoin": false},
                {"project": 17, "chain": "Ethereum"}
            ]
        })))
        .mount(&server)
        .await;

    let provider = llama(&server);

    let all = provider.fetch_pools(&[], None, false).await.unwrap();
    assert_eq!(all.len(), 3);

    let ethereum = provider.fetch_pools(&["ethereum".to_string()], None, false).await.unwrap();
    assert_eq!(ethereum.len(), 2);

    let projects = vec!["AAVE-V3".to_string()];
    let stable = provider
        .fetch_pools(&["ethereum".to_string()], Some(projects.as_slice()), true)
        .await
        .unwrap();
    assert_eq!(stable.len(), 1);
    assert_eq!(stable[0].symbol_name(), "USDC");
}

#[tokio::test]
async fn test_defillama_protocol_tvl_uses_slug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protocol/aave-v3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Aave V3",
            "tvl": [
                {"date": 1700000000, "totalLiquidityUSD": 9.0e9},
                {"date": 1700086400, "totalLiquidityUSD": 9.5e9}
            ]
        })))
        .mount(&server)
        .await;

    let tvl = llama(&server).fetch_protocol_tvl("Aave V3").await.unwrap();
    assert_eq!(tvl, Some(9.5e9));
}

#[tokio::test]
async fn test_defillama_error_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protocol/busy"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/protocols"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let provider = llama(&server);

    let busy = provider.fetch_protocol_tvl("busy").await.unwrap_err();
    assert!(matches!(busy, ProviderError::RateLimited { service: "defillama" }));

    let down = provider.fetch_protocols().await.unwrap_err();
    assert!(matches!(down, ProviderError::Status { status: 502, .. }));
}

#[tokio::test]
async fn test_defillama_protocols_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protocols"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Lido", "chain": "Ethereum", "tvl": 2.5e10, "chains": ["Ethereum"]},
            {"name": "Curve DEX", "chain": "Multi-Chain", "tvl": null}
        ])))
        .mount(&server)
        .await;

    let protocols = llama(&server).fetch_protocols().await.unwrap();
    assert_eq!(protocols.len(), 2);
    assert_eq!(protocols[0].subject_name(), "Lido");
    assert_eq!(protocols[0].tvl_usd_or_zero(), 2.5e10);
    assert_eq!(protocols[1].tvl_usd_or_zero(), 0.0);
}

#[tokio::test]
async fn test_coingecko_price_with_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onchain/simple/networks/arbitrum-one/token_price/0xToken"))
        .and(header("x-cg-pro-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"attributes": {"token_prices": {"0xtoken": "1.0004"}}}
        })))
        .mount(&server)
        .await;

    let provider = CoinGeckoClient::with_base_url(client(), &server.uri(), Some("test-key".to_string()));

    let price = provider.token_price("Arbitrum", "0xToken").await.unwrap();
    assert_eq!(price, Some(1.0004));

    // Unsupported chains never reach the server
    assert_eq!(provider.token_price("solana", "0xToken").await.unwrap(), None);
}

#[tokio::test]
async fn test_coingecko_non_200_is_no_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = CoinGeckoClient::with_base_url(client(), &server.uri(), Some("test-key".to_string()));
    assert_eq!(provider.token_price("ethereum", "0xdead").await.unwrap(), None);
}

#[tokio::test]
async fn test_etherscan_verification() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "contract"))
        .and(query_param("action", "getsourcecode"))
        .and(query_param("address", "0xverified"))
        .and(query_param("apikey", "es-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "result": [{"SourceCode": "contract Pool {}"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("address", "0xunverified"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "result": [{"SourceCode": ""}]
        })))
        .mount(&server)
        .await;

    let provider = EtherscanClient::with_base_url(
        client(),
        &format!("{}/api", server.uri()),
        Some("es-key".to_string()),
    );

    assert!(provider.is_source_verified("0xverified").await.unwrap());
    assert!(!provider.is_source_verified("0xunverified").await.unwrap());
}

#[tokio::test]
async fn test_etherscan_invalid_key_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Invalid API Key"
        })))
        .mount(&server)
        .await;

    let provider = EtherscanClient::with_base_url(
        client(),
        &format!("{}/api", server.uri()),
        Some("bad-key".to_string()),
    );

    let err = provider.is_source_verified("0xabc").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse { service: "etherscan", .. }));
}
