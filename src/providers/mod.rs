pub mod coingecko;
pub mod defillama;
pub mod etherscan;
pub mod http;
pub mod traits;

pub use coingecko::CoinGeckoClient;
pub use defillama::DefiLlamaClient;
pub use etherscan::EtherscanClient;
pub use http::build_http_client;
pub use traits::*;
