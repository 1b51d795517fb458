// Yield opportunity filtering and ranking
pub mod filter;
pub mod ranker;

pub use filter::YieldFilter;
pub use ranker::{RankedOpportunities, YieldOpportunityRanker};
