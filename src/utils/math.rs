use crate::risk::{DEFAULT_RISK_SCORE, MAX_RISK_SCORE, MIN_RISK_SCORE};

/// Clamp a raw risk score into the 1-10 scale. NaN maps to the neutral score.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return DEFAULT_RISK_SCORE;
    }
    score.max(MIN_RISK_SCORE).min(MAX_RISK_SCORE)
}

/// Arithmetic mean of a series of values
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Missing, negative and non-finite amounts count as zero
pub fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// `log10(tvl + 1)`, with negative TVL treated as zero
pub fn log10_tvl(tvl: f64) -> f64 {
    (non_negative(Some(tvl)) + 1.0).log10()
}

/// Render a USD amount as `$10M`, `$1B`, `$2.5K`
pub fn format_usd_compact(amount: f64) -> String {
    let (value, suffix) = if amount >= 1_000_000_000.0 {
        (amount / 1_000_000_000.0, "B")
    } else if amount >= 1_000_000.0 {
        (amount / 1_000_000.0, "M")
    } else if amount >= 1_000.0 {
        (amount / 1_000.0, "K")
    } else {
        (amount, "")
    };

    if value.fract() == 0.0 {
        format!("${}{}", value as u64, suffix)
    } else {
        format!("${:.1}{}", value, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(0.0), 1.0);
        assert_eq!(clamp_score(11.5), 10.0);
        assert_eq!(clamp_score(6.5), 6.5);
        assert_eq!(clamp_score(f64::NAN), 5.0);
        assert_eq!(clamp_score(f64::INFINITY), 10.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 8.0]), Some(5.0));
        assert_eq!(mean(&[7.0, 5.0, 4.0]), Some(16.0 / 3.0));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(None), 0.0);
        assert_eq!(non_negative(Some(-1.0)), 0.0);
        assert_eq!(non_negative(Some(f64::NAN)), 0.0);
        assert_eq!(non_negative(Some(12.5)), 12.5);
    }

    #[test]
    fn test_log10_tvl() {
        assert_eq!(log10_tvl(0.0), 0.0);
        assert_eq!(log10_tvl(-10.0), 0.0);
        assert!((log10_tvl(999.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_format_usd_compact() {
        assert_eq!(format_usd_compact(10_000_000.0), "$10M");
        assert_eq!(format_usd_compact(1_000_000_000.0), "$1B");
        assert_eq!(format_usd_compact(2_500.0), "$2.5K");
        assert_eq!(format_usd_compact(42.0), "$42");
    }
}
