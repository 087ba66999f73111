//! # Order Types
//!
//! Order pricing for the storefront. An [`Order`] is what the shopper asked
//! for; a [`PricedOrder`] is the same request resolved against the catalog.

use crate::error::{PaymentError, PaymentResult};
use crate::product::{Price, ProductCatalog, DEFAULT_SIZE};
use serde::{Deserialize, Serialize};

/// A single-product order as requested by the storefront
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Product ID (absent when the client omitted it)
    pub product_id: Option<String>,
    /// Requested size code
    pub size: String,
    /// Quantity
    pub quantity: u32,
}

impl Order {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            size: DEFAULT_SIZE.to_string(),
            quantity: 1,
        }
    }

    /// Builder: set size
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Builder: set quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Resolve the order against the catalog and compute its total.
    ///
    /// Unknown or inactive products fail with [`PaymentError::InvalidProduct`].
    /// A size without a price of its own is charged at the default size.
    pub fn price(&self, catalog: &ProductCatalog) -> PaymentResult<PricedOrder> {
        let product = self
            .product_id
            .as_deref()
            .and_then(|id| catalog.get(id))
            .filter(|p| p.active)
            .ok_or_else(|| PaymentError::InvalidProduct {
                product_id: self.product_id.clone(),
            })?;

        if self.quantity == 0 {
            return Err(PaymentError::InvalidRequest(
                "qty must be at least 1".to_string(),
            ));
        }

        let (size, unit) = product
            .resolve_size(&self.size)
            .ok_or_else(|| PaymentError::InvalidPrice {
                message: format!("no price for {} ({})", product.id, self.size),
            })?;
        let unit_price = Price::parse(unit, catalog.currency)?;
        let total = unit_price
            .checked_mul(self.quantity)
            .ok_or_else(|| PaymentError::InvalidRequest("qty is too large".to_string()))?;

        Ok(PricedOrder {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            requested_size: self.size.clone(),
            size: size.to_string(),
            quantity: self.quantity,
            unit_price,
            total,
        })
    }
}

/// An order resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedOrder {
    pub product_id: String,
    pub product_name: String,
    /// Size the shopper asked for
    pub requested_size: String,
    /// Size actually priced (differs after fallback)
    pub size: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub total: Price,
}

impl PricedOrder {
    /// Human-readable purchase description with the size the shopper asked
    /// for, e.g. "CloudRest Cozy Dog Bed (L)"
    pub fn description(&self) -> String {
        format!("{} ({})", self.product_name, self.requested_size)
    }

    /// Whether the requested size was replaced by the default size
    pub fn used_fallback_size(&self) -> bool {
        self.requested_size != self.size
    }
}

/// Order as created on the provider side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOrder {
    /// Opaque provider order identifier
    pub id: String,

    /// Provider status (e.g. "CREATED")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Link the buyer follows to approve the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve_url: Option<String>,
}
