//! # OAuth2 Access Tokens
//!
//! Client-credentials exchange against `/v1/oauth2/token`. Tokens are fetched
//! fresh for every provider call and never cached.

use crate::config::PayPalConfig;
use crate::http::{endpoint, read_body};
use pay_core::{PaymentError, PaymentResult};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::{debug, error, instrument};

/// Bearer token returned by PayPal
#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds, as reported by PayPal
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl AccessToken {
    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Exchanges the configured client credentials for an access token
#[derive(Debug, Clone)]
pub struct TokenFetcher {
    config: PayPalConfig,
    client: Client,
}

impl TokenFetcher {
    pub fn new(config: PayPalConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// POST `grant_type=client_credentials` with HTTP basic auth.
    ///
    /// Any non-success status, or a success body without `access_token`,
    /// is a [`PaymentError::ProviderAuth`] carrying the raw body.
    #[instrument(skip(self), fields(environment = %self.config.environment))]
    pub async fn fetch(&self) -> PaymentResult<AccessToken> {
        let url = endpoint(&self.config.api_base_url, &["v1", "oauth2", "token"])?;

        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            error!("PayPal token error: status={}, body={}", status, body);
            return Err(PaymentError::ProviderAuth {
                provider: "paypal".to_string(),
                status: Some(status.as_u16()),
                body,
            });
        }

        let token: AccessToken = serde_json::from_str(&body).map_err(|e| {
            error!("PayPal token response without access_token: {}", e);
            PaymentError::ProviderAuth {
                provider: "paypal".to_string(),
                status: Some(status.as_u16()),
                body: body.clone(),
            }
        })?;

        debug!("Fetched PayPal access token (expires_in={:?})", token.expires_in);

        Ok(token)
    }
}
