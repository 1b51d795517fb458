use std::sync::Arc;

use defi_yield_scout::{
    config::Settings,
    models::ScoutQuery,
    providers::{build_http_client, CoinGeckoClient, DefiLlamaClient, EtherscanClient},
    risk::PlaceholderGovernanceEvaluator,
    services::{ProtocolRiskAssessor, YieldScout},
    utils::init_logging,
    AppError,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "DeFi Yield Scout failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    init_logging(&settings.logging)?;

    info!("Starting DeFi Yield Scout");
    for issue in settings.validate() {
        warn!(issue = %issue, "Configuration issue");
    }
    info!(settings = ?settings.redacted(), "Configuration loaded");

    let client = build_http_client(&settings.providers)?;
    let llama = Arc::new(DefiLlamaClient::new(client.clone(), &settings.providers));
    let prices = Arc::new(CoinGeckoClient::new(client.clone(), &settings.providers));
    let etherscan = Arc::new(EtherscanClient::new(client, &settings.providers));

    let scout = YieldScout::new(llama.clone(), prices, &settings.risk);
    let query = ScoutQuery::from_settings(&settings.scout);
    let result = scout.run(&query).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    // Optional: <protocol name> [contract address]
    let mut args = std::env::args().skip(1);
    if let Some(protocol) = args.next() {
        let contract = args.next();
        let assessor = ProtocolRiskAssessor::new(
            llama,
            etherscan,
            Arc::new(PlaceholderGovernanceEvaluator),
            &settings.risk,
        );
        let assessment = assessor.assess_protocol_risk(&protocol, contract.as_deref()).await?;
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    }

    info!("DeFi Yield Scout finished");
    Ok(())
}
