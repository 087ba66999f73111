//! # Request Handlers
//!
//! Axum request handlers for the storefront payment API.
//! Create and capture proxy to the payment provider; the webhook only logs.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pay_core::{Order, PaymentError, DEFAULT_SIZE};
use pay_paypal::receive_webhook;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create order request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Product ID
    #[serde(default)]
    pub product_id: Option<String>,
    /// Quantity (number or numeric string), defaults to 1
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub qty: Option<u32>,
    /// Size code, defaults to "M"
    #[serde(default)]
    pub size: Option<String>,
}

impl CreateOrderRequest {
    fn into_order(self) -> Order {
        Order {
            product_id: self.product_id,
            size: self.size.unwrap_or_else(|| DEFAULT_SIZE.to_string()),
            quantity: self.qty.unwrap_or(1),
        }
    }
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Number(u32),
        Text(String),
    }

    match Option::<Quantity>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Quantity::Number(n)) => Ok(Some(n)),
        Some(Quantity::Text(s)) => s.trim().parse().map(Some).map_err(|_| {
            de::Error::custom(format!("qty must be a whole number, got {:?}", s))
        }),
    }
}

/// Create order response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    /// Provider order ID, handed to the PayPal buttons
    #[serde(rename = "orderID")]
    pub order_id: String,
}

/// Capture order request
#[derive(Debug, Deserialize)]
pub struct CaptureOrderRequest {
    #[serde(default, rename = "orderID")]
    pub order_id: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn payment_error_to_response(err: PaymentError) -> ApiError {
    if err.is_client_error() {
        warn!("Rejected request: {}", err);
    } else {
        error!("Request failed: {}", err);
    }

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = ErrorResponse::new(err.public_message());
    if let Some(details) = err.details() {
        response = response.with_details(details);
    }
    (status, Json(response))
}

fn rejection_to_response(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(
            ErrorResponse::new("Invalid request body")
                .with_details(Value::String(rejection.body_text())),
        ),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-pay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List the catalog with its size price table
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let products: Vec<_> = state.catalog.active_products().collect();
    Json(serde_json::json!({
        "currency": state.catalog.currency,
        "products": products,
        "count": products.len()
    }))
}

/// Price the requested product and create a provider order for it
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_to_response)?;
    let order = request.into_order();

    let priced = order
        .price(&state.catalog)
        .map_err(payment_error_to_response)?;

    if priced.used_fallback_size() {
        debug!(
            "No price for size {:?} of {}, charging size {}",
            priced.requested_size, priced.product_id, priced.size
        );
    }

    info!(
        "Creating order: product={}, size={}, qty={}, total={}",
        priced.product_id,
        priced.size,
        priced.quantity,
        priced.total.display()
    );

    let created = state
        .payments
        .create_order(&priced)
        .await
        .map_err(payment_error_to_response)?;

    Ok(Json(CreateOrderResponse {
        order_id: created.id,
    }))
}

/// Capture an approved order and return the provider's response unchanged
#[instrument(skip(state, payload))]
pub async fn capture_order(
    State(state): State<AppState>,
    payload: Result<Json<CaptureOrderRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(rejection_to_response)?;

    let order_id = request
        .order_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(PaymentError::MissingOrderId)
        .map_err(payment_error_to_response)?;

    let capture = state
        .payments
        .capture_order(&order_id)
        .await
        .map_err(payment_error_to_response)?;

    // TODO: persist the capture and trigger fulfillment once an order store exists
    Ok(Json(capture))
}

/// Webhook receiver: log the event, always acknowledge
pub async fn paypal_webhook(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    receive_webhook(state.webhooks.as_ref(), &body);
    (StatusCode::OK, "ok")
}
