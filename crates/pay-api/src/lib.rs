//! # pay-api
//!
//! HTTP API layer for the storefront payment bridge.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/products` | Catalog with size prices |
//! | POST | `/api/paypal/create-order` | Create PayPal order, returns `orderID` |
//! | POST | `/api/paypal/capture-order` | Capture PayPal order |
//! | POST | `/api/paypal/webhook` | PayPal webhook (always `ok`) |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
