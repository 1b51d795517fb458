// Advisory strings derived from a composite score and its factor explanations
use crate::risk::RiskFactorMap;

pub const HIGH_RISK_POSITION: &str = "High risk — consider smaller position size";
pub const HIGH_RISK_MONITOR: &str = "Monitor protocol closely for changes";
pub const MEDIUM_RISK_DILIGENCE: &str = "Medium risk — standard due diligence recommended";
pub const LOWER_RISK_MONITOR: &str = "Lower risk — still monitor for changes";
pub const AWAIT_VERIFICATION: &str = "Consider waiting for contract verification";
pub const SMALL_POSITION_LOW_TVL: &str = "Start with smaller position due to low TVL";

const HIGH_RISK_THRESHOLD: f64 = 7.0;
const MEDIUM_RISK_THRESHOLD: f64 = 5.0;

/// Generate recommendations for a composite score.
///
/// Order matters: the score bucket comes first, then one entry per matching
/// explanation in factor order. Duplicates are kept.
pub fn generate_recommendations(composite_score: f64, factors: &RiskFactorMap) -> Vec<String> {
    let mut recommendations = Vec::new();

    if composite_score > HIGH_RISK_THRESHOLD {
        recommendations.push(HIGH_RISK_POSITION.to_string());
        recommendations.push(HIGH_RISK_MONITOR.to_string());
    } else if composite_score > MEDIUM_RISK_THRESHOLD {
        recommendations.push(MEDIUM_RISK_DILIGENCE.to_string());
    } else {
        recommendations.push(LOWER_RISK_MONITOR.to_string());
    }

    for result in factors.values() {
        for explanation in result.explanations() {
            let explanation = explanation.to_lowercase();
            if explanation.contains("not verified") {
                recommendations.push(AWAIT_VERIFICATION.to_string());
            }
            if explanation.contains("low tvl") {
                recommendations.push(SMALL_POSITION_LOW_TVL.to_string());
            }
        }
    }

    recommendations
}
