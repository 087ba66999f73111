//! # PayPal Configuration
//!
//! Configuration management for the PayPal integration.
//! Credentials are loaded from environment variables.

use pay_core::PaymentError;
use std::env;
use std::fmt;
use std::time::Duration;

/// Live API host
pub const PRODUCTION_BASE_URL: &str = "https://api-m.paypal.com";

/// Sandbox API host
pub const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";

/// Brand shown on the PayPal checkout page unless overridden
pub const DEFAULT_BRAND_NAME: &str = "FluffyFriend";

/// PayPal environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayPalEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl PayPalEnvironment {
    /// Parse the `PAYPAL_ENV` flag; anything but `production` means sandbox
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("production") {
            PayPalEnvironment::Production
        } else {
            PayPalEnvironment::Sandbox
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            PayPalEnvironment::Sandbox => SANDBOX_BASE_URL,
            PayPalEnvironment::Production => PRODUCTION_BASE_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayPalEnvironment::Sandbox => "sandbox",
            PayPalEnvironment::Production => "production",
        }
    }
}

impl fmt::Display for PayPalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PayPal API configuration
#[derive(Clone)]
pub struct PayPalConfig {
    /// REST app client ID
    pub client_id: String,

    /// REST app client secret
    pub client_secret: String,

    /// Sandbox or production
    pub environment: PayPalEnvironment,

    /// API base URL (derived from the environment, overridable for testing)
    pub api_base_url: String,

    /// Brand name on the approval page
    pub brand_name: String,

    /// Outbound request timeout; `None` keeps the transport default
    pub http_timeout: Option<Duration>,
}

impl PayPalConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYPAL_CLIENT_ID`
    /// - `PAYPAL_CLIENT_SECRET`
    ///
    /// Optional: `PAYPAL_ENV`, `PAYPAL_BRAND_NAME`, `PAYPAL_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let client_id = required_var("PAYPAL_CLIENT_ID")?;
        let client_secret = required_var("PAYPAL_CLIENT_SECRET")?;

        let environment = env::var("PAYPAL_ENV")
            .map(|flag| PayPalEnvironment::from_flag(&flag))
            .unwrap_or_default();

        let http_timeout = match env::var("PAYPAL_HTTP_TIMEOUT_SECS") {
            Ok(secs) => Some(Duration::from_secs(secs.trim().parse().map_err(|_| {
                PaymentError::Configuration(format!(
                    "PAYPAL_HTTP_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    secs
                ))
            })?)),
            Err(_) => None,
        };

        let mut config = Self::new(client_id, client_secret, environment);
        if let Ok(brand) = env::var("PAYPAL_BRAND_NAME") {
            config = config.with_brand_name(brand);
        }
        config.http_timeout = http_timeout;

        Ok(config)
    }

    /// Create config with explicit values
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: PayPalEnvironment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            environment,
            api_base_url: environment.base_url().to_string(),
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            http_timeout: None,
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the brand name shown to buyers
    pub fn with_brand_name(mut self, brand: impl Into<String>) -> Self {
        self.brand_name = brand.into();
        self
    }
}

impl fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_base_url", &self.api_base_url)
            .field("brand_name", &self.brand_name)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn required_var(name: &str) -> Result<String, PaymentError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PaymentError::Configuration(format!("{} not set", name))),
    }
}
