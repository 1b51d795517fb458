pub mod protocol_risk_assessor;
pub mod report_assembler;
pub mod yield_analyzer;
pub mod yield_scout;

pub use protocol_risk_assessor::ProtocolRiskAssessor;
pub use report_assembler::*;
pub use yield_analyzer::YieldAnalyzer;
pub use yield_scout::YieldScout;
