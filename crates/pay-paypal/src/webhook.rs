//! # PayPal Webhook Handling
//!
//! PayPal posts event notifications (`PAYMENT.CAPTURE.COMPLETED`, ...) to the
//! webhook endpoint. Events are parsed leniently and handed to a
//! [`WebhookHandler`]; signatures are not verified.

use chrono::{DateTime, Utc};
use pay_core::{PaymentError, PaymentResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// A webhook notification, with the envelope fields PayPal usually sends
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    pub id: Option<String>,
    pub event_type: Option<String>,
    pub resource_type: Option<String>,
    pub summary: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    /// `resource.id` (order or capture id)
    pub resource_id: Option<String>,
    /// Full event body
    pub raw: Value,
}

impl WebhookEvent {
    /// Parse a raw webhook body; only invalid JSON is an error
    pub fn from_slice(payload: &[u8]) -> PaymentResult<Self> {
        let raw: Value = serde_json::from_slice(payload).map_err(|e| {
            PaymentError::Serialization(format!("webhook body is not JSON: {}", e))
        })?;
        Ok(Self::from_value(raw))
    }

    /// Pick out the envelope fields from any JSON value
    pub fn from_value(raw: Value) -> Self {
        let text = |field: &str| raw.get(field).and_then(Value::as_str).map(String::from);
        let id = text("id");
        let event_type = text("event_type");
        let resource_type = text("resource_type");
        let summary = text("summary");

        let create_time = raw
            .get("create_time")
            .and_then(Value::as_str)
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc));

        let resource_id = raw
            .get("resource")
            .and_then(|r| r.get("id"))
            .and_then(Value::as_str)
            .map(String::from);

        Self {
            id,
            event_type,
            resource_type,
            summary,
            create_time,
            resource_id,
            raw,
        }
    }
}

/// Receives every webhook notification
///
/// Implement this trait to act on events (fulfillment, emails, ...).
pub trait WebhookHandler: Send + Sync {
    /// Called for every body that parses as JSON
    fn on_event(&self, event: &WebhookEvent);

    /// Called when the body is not JSON
    fn on_unparsable(&self, payload: &[u8], error: &PaymentError) {
        warn!(
            "Ignoring webhook body that is not JSON ({} bytes): {}",
            payload.len(),
            error
        );
    }
}

/// Default webhook handler (just logs events)
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {
    fn on_event(&self, event: &WebhookEvent) {
        info!(
            "Webhook event: {} (id={:?}, resource={:?}, summary={:?})",
            event.event_type.as_deref().unwrap_or("<none>"),
            event.id,
            event.resource_id,
            event.summary
        );
    }
}

/// Parse a webhook body and hand it to the handler. Never fails.
pub fn receive_webhook(handler: &dyn WebhookHandler, payload: &[u8]) {
    match WebhookEvent::from_slice(payload) {
        Ok(event) => handler.on_event(&event),
        Err(e) => handler.on_unparsable(payload, &e),
    }
}
