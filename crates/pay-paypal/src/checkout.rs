//! # PayPal Orders v2
//!
//! Implementation of the PayPal Orders API: create an order for the buyer to
//! approve, then capture it once approved.

use crate::config::PayPalConfig;
use crate::http::{body_as_details, build_client, endpoint, read_body};
use crate::token::TokenFetcher;
use async_trait::async_trait;
use pay_core::{PaymentError, PaymentResult, PaymentStrategy, PricedOrder, ProviderOrder};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "paypal";

/// PayPal checkout strategy
///
/// Every call fetches a fresh access token, then performs the order request.
pub struct PayPalCheckoutStrategy {
    config: PayPalConfig,
    client: Client,
    tokens: TokenFetcher,
}

impl PayPalCheckoutStrategy {
    /// Create a new PayPal checkout strategy
    pub fn new(config: PayPalConfig) -> PaymentResult<Self> {
        let client = build_client(&config)?;
        let tokens = TokenFetcher::new(config.clone(), client.clone());

        Ok(Self {
            config,
            client,
            tokens,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(PayPalConfig::from_env()?)
    }

    /// Build the order-creation body for a priced order
    fn build_order_request(&self, order: &PricedOrder) -> CreateOrderRequest<'_> {
        CreateOrderRequest {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                amount: Amount {
                    currency_code: order.total.currency.as_str(),
                    value: order.total.to_decimal_string(),
                },
                description: order.description(),
            }],
            application_context: ApplicationContext {
                brand_name: &self.config.brand_name,
                landing_page: "NO_PREFERENCE",
                user_action: "PAY_NOW",
            },
        }
    }
}

#[async_trait]
impl PaymentStrategy for PayPalCheckoutStrategy {
    #[instrument(skip(self, order), fields(product_id = %order.product_id, total = %order.total.display()))]
    async fn create_order(&self, order: &PricedOrder) -> PaymentResult<ProviderOrder> {
        let token = self.tokens.fetch().await?;
        let request = self.build_order_request(order);
        let url = endpoint(&self.config.api_base_url, &["v2", "checkout", "orders"])?;

        debug!(
            "Creating PayPal order: {} x{} = {}",
            request.purchase_units[0].description,
            order.quantity,
            request.purchase_units[0].amount.value
        );

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, token.bearer())
            .json(&request)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            error!("PayPal create order error: status={}, body={}", status, body);
            return Err(PaymentError::ProviderCreate {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                details: body_as_details(&body),
            });
        }

        let created: CreateOrderResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse PayPal order response: {}", e))
        })?;

        info!(
            "Created PayPal order: id={}, status={:?}",
            created.id, created.status
        );

        let approve_url = created
            .links
            .iter()
            .find(|link| link.rel == "approve" || link.rel == "payer-action")
            .map(|link| link.href.clone());

        Ok(ProviderOrder {
            id: created.id,
            status: created.status,
            approve_url,
        })
    }

    #[instrument(skip(self))]
    async fn capture_order(&self, order_id: &str) -> PaymentResult<Value> {
        if order_id.trim().is_empty() {
            return Err(PaymentError::MissingOrderId);
        }

        let token = self.tokens.fetch().await?;
        let url = endpoint(
            &self.config.api_base_url,
            &["v2", "checkout", "orders", order_id, "capture"],
        )?;

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, token.bearer())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            error!("PayPal capture error: status={}, body={}", status, body);
            return Err(PaymentError::ProviderCapture {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                details: body_as_details(&body),
            });
        }

        let capture: Value = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse PayPal capture response: {}", e))
        })?;

        info!(
            "Captured PayPal order: id={}, status={}",
            order_id,
            capture
                .get("status")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown")
        );

        Ok(capture)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// PayPal API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct CreateOrderRequest<'a> {
    intent: &'static str,
    purchase_units: Vec<PurchaseUnit>,
    application_context: ApplicationContext<'a>,
}

#[derive(Debug, Serialize)]
struct PurchaseUnit {
    amount: Amount,
    description: String,
}

#[derive(Debug, Serialize)]
struct Amount {
    currency_code: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct ApplicationContext<'a> {
    brand_name: &'a str,
    landing_page: &'static str,
    user_action: &'static str,
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    links: Vec<OrderLink>,
}

#[derive(Debug, Deserialize)]
struct OrderLink {
    href: String,
    rel: String,
}
