//! # tienda-api
//!
//! HTTP API layer for the tienda storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout-session creation backed by Mercado Pago Checkout Pro
//! - Product listing ingested from a published spreadsheet
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/checkout` | Create checkout session |
//! | GET | `/api/v1/products` | List products |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
