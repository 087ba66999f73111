//! Shared HTTP plumbing for the PayPal REST API.

use crate::config::PayPalConfig;
use pay_core::{PaymentError, PaymentResult};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;

/// Build the HTTP client used for every PayPal call
pub fn build_client(config: &PayPalConfig) -> PaymentResult<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| PaymentError::Configuration(format!("failed to create HTTP client: {}", e)))
}

/// Join path segments onto the API base URL, percent-encoding each segment
pub fn endpoint(base_url: &str, segments: &[&str]) -> PaymentResult<Url> {
    let mut url = Url::parse(base_url).map_err(|e| {
        PaymentError::Configuration(format!("invalid PayPal base URL {}: {}", base_url, e))
    })?;
    url.path_segments_mut()
        .map_err(|_| {
            PaymentError::Configuration(format!("PayPal base URL cannot be a base: {}", base_url))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Drain a response into its status and raw body text
pub async fn read_body(response: Response) -> PaymentResult<(StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PaymentError::NetworkError(e.to_string()))?;
    Ok((status, body))
}

/// Provider details for an error body: parsed JSON when possible, the raw text otherwise
pub fn body_as_details(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
