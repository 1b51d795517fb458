use url::Url;

use crate::config::Settings;

const REDACTED_PREFIX_LEN: usize = 10;
const MAX_APY_THRESHOLD_LIMIT: f64 = 10_000.0;

fn check_url(issues: &mut Vec<String>, field: &str, value: &str) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => issues.push(format!("{} has unsupported scheme '{}'", field, url.scheme())),
        Err(e) => issues.push(format!("{} is not a valid URL: {}", field, e)),
    }
}

fn is_missing(key: &Option<String>) -> bool {
    key.as_deref().map_or(true, |k| k.trim().is_empty())
}

fn redact(key: &Option<String>) -> Option<String> {
    key.as_ref().map(|k| {
        let prefix: String = k.chars().take(REDACTED_PREFIX_LEN).collect();
        format!("{}...", prefix)
    })
}

impl Settings {
    /// Advisory configuration issues; none of them prevent startup
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if is_missing(&self.providers.coingecko_api_key) {
            issues.push("COINGECKO_API_KEY recommended for token prices".to_string());
        }
        if is_missing(&self.providers.etherscan_api_key) {
            issues.push("ETHERSCAN_API_KEY recommended for contract verification".to_string());
        }

        check_url(&mut issues, "providers.defillama_api_url", &self.providers.defillama_api_url);
        check_url(&mut issues, "providers.defillama_yields_url", &self.providers.defillama_yields_url);
        check_url(&mut issues, "providers.coingecko_api_url", &self.providers.coingecko_api_url);
        check_url(&mut issues, "providers.etherscan_api_url", &self.providers.etherscan_api_url);

        if self.providers.request_timeout_seconds == 0 {
            issues.push("providers.request_timeout_seconds must be positive".to_string());
        }

        if self.scout.tolerance_max_risk_score().is_none() {
            issues.push("scout.risk_tolerance must be 'low', 'medium', or 'high'".to_string());
        }
        let max_apy = self.scout.max_apy_threshold;
        if !(max_apy > 0.0 && max_apy <= MAX_APY_THRESHOLD_LIMIT) {
            issues.push(format!("scout.max_apy_threshold should be between 0 and {}", MAX_APY_THRESHOLD_LIMIT));
        }
        if let Some(max_risk) = self.scout.max_risk_score {
            if !(1.0..=10.0).contains(&max_risk) {
                issues.push(format!("scout.max_risk_score {} is outside [1, 10]", max_risk));
            }
        }
        if self.scout.default_chains.is_empty() {
            issues.push("scout.default_chains is empty; every chain will match".to_string());
        }

        issues
    }

    /// Copy safe to log: API keys keep only their first characters
    pub fn redacted(&self) -> Settings {
        let mut settings = self.clone();
        settings.providers.coingecko_api_key = redact(&self.providers.coingecko_api_key);
        settings.providers.etherscan_api_key = redact(&self.providers.etherscan_api_key);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Settings {
        let mut settings = Settings::default();
        settings.providers.coingecko_api_key = Some("cg-0123456789abcdef".to_string());
        settings.providers.etherscan_api_key = Some("ES0123456789".to_string());
        settings
    }

    #[test]
    fn test_configured_settings_are_clean() {
        assert!(configured().validate().is_empty());
    }

    #[test]
    fn test_missing_keys_are_reported() {
        let issues = Settings::default().validate();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("COINGECKO_API_KEY"));
        assert!(issues[1].contains("ETHERSCAN_API_KEY"));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let mut settings = configured();
        settings.providers.etherscan_api_url = "not a url".to_string();
        settings.scout.risk_tolerance = "yolo".to_string();
        settings.scout.max_apy_threshold = 0.0;
        settings.scout.max_risk_score = Some(12.0);

        let issues = settings.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().any(|i| i.contains("etherscan_api_url")));
        assert!(issues.iter().any(|i| i.contains("risk_tolerance")));
        assert!(issues.iter().any(|i| i.contains("max_apy_threshold")));
        assert!(issues.iter().any(|i| i.contains("max_risk_score")));
    }

    #[test]
    fn test_redacted_keys() {
        let redacted = configured().redacted();
        assert_eq!(redacted.providers.coingecko_api_key.as_deref(), Some("cg-0123456..."));
        assert_eq!(redacted.providers.etherscan_api_key.as_deref(), Some("ES01234567..."));
        assert_eq!(Settings::default().redacted().providers.etherscan_api_key, None);
    }
}
