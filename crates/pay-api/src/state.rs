//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the payment strategy, configuration, and product catalog.

use anyhow::Context;
use pay_core::{BoxedPaymentStrategy, ProductCatalog};
use pay_paypal::{LoggingWebhookHandler, PayPalCheckoutStrategy, PayPalConfig, WebhookHandler};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Storefront static files, served for every unmatched path
    pub public_dir: Option<PathBuf>,
    /// Explicit catalog file (otherwise `config/products.toml` is searched)
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load from environment variables (and `.env`)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000),
            public_dir: var("PUBLIC_DIR")
                .map(PathBuf::from)
                .or_else(|| Some(PathBuf::from("public")).filter(|dir| dir.is_dir())),
            catalog_path: var("CATALOG_PATH").map(PathBuf::from),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }
}

/// Shared application state
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Payment provider
    pub payments: BoxedPaymentStrategy,
    /// Product catalog
    pub catalog: Arc<ProductCatalog>,
    /// Receives webhook notifications
    pub webhooks: Arc<dyn WebhookHandler>,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create the state with the PayPal strategy and the configured catalog
    pub fn new(config: AppConfig, paypal: PayPalConfig) -> anyhow::Result<Self> {
        let catalog = load_product_catalog(config.catalog_path.as_deref())?;

        let strategy = PayPalCheckoutStrategy::new(paypal)
            .map_err(|e| anyhow::anyhow!("Failed to initialize PayPal: {}", e))?;

        Ok(Self::with_strategy(config, catalog, Arc::new(strategy)))
    }

    /// Assemble the state from already-built parts
    pub fn with_strategy(
        config: AppConfig,
        catalog: ProductCatalog,
        payments: BoxedPaymentStrategy,
    ) -> Self {
        Self {
            payments,
            catalog: Arc::new(catalog),
            webhooks: Arc::new(LoggingWebhookHandler),
            config: Arc::new(config),
        }
    }

    /// Builder: replace the webhook handler
    pub fn with_webhook_handler(mut self, handler: Arc<dyn WebhookHandler>) -> Self {
        self.webhooks = handler;
        self
    }
}

/// Load product catalog from config file, falling back to the built-in one
fn load_product_catalog(explicit: Option<&Path>) -> anyhow::Result<ProductCatalog> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = ProductCatalog::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded {} products from {}", catalog.products.len(), path.display());
        return Ok(catalog);
    }

    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.products.len(), path);
            return Ok(catalog);
        }
    }

    tracing::warn!("No product catalog found, using built-in catalog");
    Ok(ProductCatalog::builtin())
}
