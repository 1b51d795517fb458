use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ScoutQuery, YieldOpportunity};
use crate::risk::{RiskFactorMap, RiskLevel};

/// Output of the pool scouting pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutResult {
    pub input: ScoutQuery,
    pub pools: Vec<YieldOpportunity>,
    /// Records that passed the filters, before the result cap
    pub total_candidates: usize,
    pub notes: String,
    pub generated_at: DateTime<Utc>,
}

/// Output of the protocol list analyzer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub chains_analyzed: Vec<String>,
    pub input: ScoutQuery,
    pub total_opportunities: usize,
    pub opportunities: Vec<YieldOpportunity>,
    pub notes: String,
    pub analysis_timestamp: DateTime<Utc>,
}

/// Output of the protocol risk assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolRiskAssessment {
    pub protocol: String,
    pub contract_address: Option<String>,
    pub risk_level: RiskLevel,
    pub composite_risk_score: f64,
    pub risk_factors: RiskFactorMap,
    pub recommendations: Vec<String>,
    /// Set when at least one factor used the neutral fallback
    pub degraded: bool,
    pub assessment_timestamp: DateTime<Utc>,
}
