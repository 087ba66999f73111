//! # Payment Error Types
//!
//! Typed error handling for the storefront payment bridge.
//! All payment operations return `Result<T, PaymentError>`.

use serde_json::Value;
use thiserror::Error;

/// Generic message returned to clients for unclassified failures
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing credentials, unreadable catalog)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product id missing or not in the catalog
    #[error("Invalid product: {product_id:?}")]
    InvalidProduct { product_id: Option<String> },

    /// Capture requested without an order id
    #[error("orderID required")]
    MissingOrderId,

    /// Catalog price could not be parsed or computed
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    /// OAuth2 token endpoint rejected the client credentials
    #[error("Provider token error [{provider}] (status {status:?}): {body}")]
    ProviderAuth {
        provider: String,
        status: Option<u16>,
        body: String,
    },

    /// Provider refused to create the order
    #[error("Provider create error [{provider}] (status {status}): {details}")]
    ProviderCreate {
        provider: String,
        status: u16,
        details: Value,
    },

    /// Provider refused to capture the order
    #[error("Provider capture error [{provider}] (status {status}): {details}")]
    ProviderCapture {
        provider: String,
        status: u16,
        details: Value,
    },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns true if the caller sent bad input (as opposed to an upstream failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaymentError::InvalidRequest(_)
                | PaymentError::InvalidProduct { .. }
                | PaymentError::MissingOrderId
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Message safe to return to the storefront.
    ///
    /// Unclassified failures collapse to [`GENERIC_SERVER_ERROR`]; the full
    /// error is only ever logged.
    pub fn public_message(&self) -> String {
        match self {
            PaymentError::InvalidRequest(msg) => msg.clone(),
            PaymentError::InvalidProduct { .. } => "Invalid product".to_string(),
            PaymentError::MissingOrderId => "orderID required".to_string(),
            PaymentError::ProviderAuth { .. } => "PayPal token error".to_string(),
            PaymentError::ProviderCreate { .. } => "PayPal create failed".to_string(),
            PaymentError::ProviderCapture { .. } => "Capture failed".to_string(),
            PaymentError::Configuration(_)
            | PaymentError::InvalidPrice { .. }
            | PaymentError::NetworkError(_)
            | PaymentError::Serialization(_) => GENERIC_SERVER_ERROR.to_string(),
        }
    }

    /// Provider-supplied details attached to upstream failures
    pub fn details(&self) -> Option<Value> {
        match self {
            PaymentError::ProviderAuth { body, .. } => Some(
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone())),
            ),
            PaymentError::ProviderCreate { details, .. }
            | PaymentError::ProviderCapture { details, .. } => Some(details.clone()),
            _ => None,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
