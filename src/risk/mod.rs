// Risk scoring: per-factor evaluators, composite scoring and recommendations

pub mod errors;
pub mod factors;
pub mod evaluators;
pub mod composite;
pub mod recommendations;
pub mod tiers;

pub use errors::*;
pub use factors::*;
pub use evaluators::*;
pub use composite::*;
pub use recommendations::*;
pub use tiers::*;

// Risk scale: 1 = lowest risk, 10 = highest risk
pub const DEFAULT_RISK_SCORE: f64 = 5.0;
pub const MAX_RISK_SCORE: f64 = 10.0;
pub const MIN_RISK_SCORE: f64 = 1.0;
