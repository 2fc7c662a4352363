//! # Tienda
//!
//! Storefront backend: catalog ingestion from a published sheet plus
//! Mercado Pago hosted checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export MP_ACCESS_TOKEN=TEST-...
//! export PRODUCTS_CSV_URL=https://docs.google.com/spreadsheets/.../pub?output=csv
//! export URL=https://stimportados.shop
//!
//! # Run the server
//! tienda
//! ```

use tienda_api::{routes, state::AppState};
use tracing::{info, warn, Level};
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

    // Initialize application state
    let state = AppState::from_env()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);

    let mp = &state.config.mercadopago;
    match &mp.access_token {
        None => warn!("MP_ACCESS_TOKEN is not set; checkout requests will fail"),
        Some(_) if mp.is_sandbox_token() => {
            info!("Mercado Pago: sandbox credentials detected")
        }
        Some(_) => info!("Mercado Pago: production credentials detected"),
    }

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Tienda starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Checkout: POST http://{}/api/v1/checkout", addr);
        info!("Products: GET http://{}/api/v1/products", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
