//! # Storefront Pay
//!
//! Backend for the storefront's PayPal checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export PAYPAL_CLIENT_ID=...
//! export PAYPAL_CLIENT_SECRET=...
//! export PAYPAL_ENV=sandbox   # or production
//!
//! # Run the server
//! storefront-pay
//! ```

use pay_api::{routes, state::AppConfig, state::AppState};
use pay_paypal::PayPalConfig;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = AppConfig::from_env();
    let paypal = PayPalConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load PayPal config: {}", e))?;
    let environment = paypal.environment;

    let addr = config.socket_addr()?;
    if let Some(dir) = &config.public_dir {
        info!("Serving storefront from {}", dir.display());
    }

    let state = AppState::new(config, paypal)?;
    info!("Products loaded: {}", state.catalog.products.len());

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {} (env={})", addr, environment);

    axum::serve(listener, app).await?;

    Ok(())
}
