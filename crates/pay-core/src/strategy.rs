//! # Payment Strategy Trait
//!
//! Core Strategy pattern trait for payment providers.
//! Implementations: PayPal Orders v2.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentStrategy (trait)                  │
//! │  ├── create_order()                                         │
//! │  ├── capture_order()                                        │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │PayPalCheckout │
//!                    │   Strategy    │
//!                    └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::order::{PricedOrder, ProviderOrder};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Core trait for payment provider implementations.
///
/// Implementations authenticate with the provider on every call; nothing is
/// cached between requests.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Create a provider-side order for a priced order.
    async fn create_order(&self, order: &PricedOrder) -> PaymentResult<ProviderOrder>;

    /// Capture a previously approved order.
    ///
    /// Returns the provider's capture response unchanged.
    async fn capture_order(&self, order_id: &str) -> PaymentResult<Value>;

    /// Get the provider name (for logging and routing).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;
