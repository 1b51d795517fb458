use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::config::ProviderSettings;
use crate::providers::ProviderError;

pub const USER_AGENT: &str = "DeFi-Yield-Scout/0.1";

/// One client shared by every provider
pub fn build_http_client(settings: &ProviderSettings) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_seconds.max(1)))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProviderError::Http {
            service: "http",
            message: format!("Failed to build HTTP client: {}", e),
        })
}

pub(crate) fn transport_error(service: &'static str, err: reqwest::Error) -> ProviderError {
    ProviderError::Http {
        service,
        message: err.to_string(),
    }
}

/// Reject non-success responses, mapping 429 to `RateLimited`
pub(crate) fn check_status(service: &'static str, response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited { service });
    }
    if !status.is_success() {
        return Err(ProviderError::Status {
            service,
            status: status.as_u16(),
        });
    }
    Ok(response)
}

pub(crate) async fn read_json(service: &'static str, response: Response) -> Result<Value, ProviderError> {
    let body = response.text().await.map_err(|e| ProviderError::Http {
        service,
        message: format!("Failed to read response: {}", e),
    })?;

    serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse {
        service,
        message: format!("JSON parse error: {}", e),
    })
}

/// Numbers arrive both as JSON numbers and as decimal strings
pub(crate) fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}
