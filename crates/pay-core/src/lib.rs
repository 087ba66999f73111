//! # pay-core
//!
//! Core types and traits for the storefront payment bridge.
//!
//! This crate provides:
//! - `PaymentStrategy` trait for implementing payment providers
//! - `Product` and `ProductCatalog` for the size-priced catalog
//! - `Order` and `PricedOrder` for order-total computation
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{Order, ProductCatalog, PaymentStrategy};
//!
//! let catalog = ProductCatalog::builtin();
//! let priced = Order::new("cloudrest-cozy-dog-bed")
//!     .with_size("L")
//!     .with_quantity(2)
//!     .price(&catalog)?;
//! assert_eq!(priced.total.to_decimal_string(), "119.98");
//!
//! let provider_order = strategy.create_order(&priced).await?;
//! ```

pub mod error;
pub mod order;
pub mod product;
pub mod strategy;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult, GENERIC_SERVER_ERROR};
pub use order::{Order, PricedOrder, ProviderOrder};
pub use product::{Currency, Price, Product, ProductCatalog, DEFAULT_SIZE};
pub use strategy::{BoxedPaymentStrategy, PaymentStrategy};
