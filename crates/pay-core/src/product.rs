//! # Product Types
//!
//! Product catalog types for the storefront.
//! The catalog is built in, or loaded from `config/products.toml`.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size used when the requested size has no price of its own
pub const DEFAULT_SIZE: &str = "M";

/// Checkout currency (ISO 4217). The storefront only charges in euros, so a
/// catalog naming any other currency fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    EUR,
}

impl Currency {
    /// Returns the ISO 4217 currency code as PayPal expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price with amount in the smallest currency unit (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in cents
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a price from smallest unit (cents)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Parse a decimal string such as `"49.99"`, `"50"` or `"0.5"`.
    ///
    /// At most two fractional digits are accepted so every catalog price is
    /// exact in cents.
    pub fn parse(decimal: &str, currency: Currency) -> PaymentResult<Self> {
        let invalid = |reason: &str| PaymentError::InvalidPrice {
            message: format!("{:?}: {}", decimal, reason),
        };

        let trimmed = decimal.trim();
        let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("not a non-negative decimal number"));
        }
        if frac.len() > 2 {
            return Err(invalid("more than two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount out of range"))?
        };
        let cents: i64 = format!("{:0<2}", frac)
            .parse()
            .map_err(|_| invalid("bad fractional part"))?;

        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .map(|amount| Self::from_cents(amount, currency))
            .ok_or_else(|| invalid("amount out of range"))
    }

    /// Multiply by a quantity, `None` on overflow
    pub fn checked_mul(&self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(i64::from(quantity))
            .map(|amount| Self::from_cents(amount, self.currency))
    }

    /// Decimal string with exactly two fractional digits (e.g. `"119.98"`)
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Format for display (e.g., "€49.99")
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.to_decimal_string())
    }
}

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., "cloudrest-cozy-dog-bed")
    pub id: String,

    /// Display name, used in the order description
    pub name: String,

    /// Size code to decimal price string
    pub prices: BTreeMap<String, String>,

    /// Whether this product is available for purchase
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prices: BTreeMap::new(),
            active: true,
        }
    }

    /// Builder: add a size with its decimal price
    pub fn with_size(mut self, size: impl Into<String>, price: impl Into<String>) -> Self {
        self.prices.insert(size.into(), price.into());
        self
    }

    /// Look up a size, falling back to [`DEFAULT_SIZE`].
    ///
    /// Returns the size actually priced together with its price string.
    pub fn resolve_size<'a>(&'a self, size: &str) -> Option<(&'a str, &'a str)> {
        self.prices
            .get_key_value(size)
            .or_else(|| self.prices.get_key_value(DEFAULT_SIZE))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Product catalog, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCatalog {
    /// Currency every price in the catalog is expressed in
    #[serde(default)]
    pub currency: Currency,

    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            products: Vec::new(),
        }
    }

    /// The storefront's built-in catalog
    pub fn builtin() -> Self {
        let mut catalog = Self::new(Currency::EUR);
        catalog.add(
            Product::new("cloudrest-cozy-dog-bed", "CloudRest Cozy Dog Bed")
                .with_size("S", "39.99")
                .with_size("M", "49.99")
                .with_size("L", "59.99"),
        );
        catalog
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Get all active products
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }

    /// Check that every price parses and every product has a fallback size
    pub fn validate(&self) -> PaymentResult<()> {
        for product in &self.products {
            if !product.prices.contains_key(DEFAULT_SIZE) {
                return Err(PaymentError::Configuration(format!(
                    "product {} has no price for default size {}",
                    product.id, DEFAULT_SIZE
                )));
            }
            for price in product.prices.values() {
                Price::parse(price, self.currency)?;
            }
        }
        Ok(())
    }

    /// Load and validate a catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> PaymentResult<Self> {
        let catalog: Self = toml::from_str(toml_str)
            .map_err(|e| PaymentError::Configuration(format!("invalid catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
