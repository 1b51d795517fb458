// Per-signal risk factor evaluators
pub mod tvl;
pub mod governance;
pub mod contract;

pub use tvl::{TvlRiskConfig, TvlRiskEvaluator};
pub use governance::{GovernanceEvaluator, PlaceholderGovernanceEvaluator};
pub use contract::{ContractRiskConfig, ContractRiskEvaluator};
