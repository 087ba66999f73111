//! # pay-paypal
//!
//! PayPal payment strategy for the storefront payment bridge.
//!
//! - **TokenFetcher** - OAuth2 client-credentials exchange, a fresh token per call
//! - **PayPalCheckoutStrategy** - Orders v2 create and capture
//! - **webhook** - lenient event parsing and a logging handler
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_paypal::PayPalCheckoutStrategy;
//! use pay_core::{Order, PaymentStrategy, ProductCatalog};
//!
//! // Create strategy from environment
//! let strategy = PayPalCheckoutStrategy::from_env()?;
//!
//! let priced = Order::new("cloudrest-cozy-dog-bed").price(&ProductCatalog::builtin())?;
//! let order = strategy.create_order(&priced).await?;
//!
//! // Buyer approves on PayPal, then:
//! let capture = strategy.capture_order(&order.id).await?;
//! ```

pub mod checkout;
pub mod config;
pub mod http;
pub mod token;
pub mod webhook;

// Re-exports
pub use checkout::PayPalCheckoutStrategy;
pub use config::{PayPalConfig, PayPalEnvironment};
pub use token::{AccessToken, TokenFetcher};
pub use webhook::{receive_webhook, LoggingWebhookHandler, WebhookEvent, WebhookHandler};
