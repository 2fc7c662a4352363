//! # Application State
//!
//! Shared state for the Axum application: the checkout service and the
//! catalog client, both built once from injected configuration.

use std::sync::Arc;
use tienda_catalog::CatalogClient;
use tienda_mercadopago::{CheckoutService, MercadoPagoConfig};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Published CSV the catalog is ingested from
    pub products_csv_url: Option<String>,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Payment provider configuration
    pub mercadopago: MercadoPagoConfig,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            products_csv_url: std::env::var("PRODUCTS_CSV_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            mercadopago: MercadoPagoConfig::from_env(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout session service
    pub checkout: Arc<CheckoutService>,
    /// Catalog client, present when a CSV URL is configured
    pub catalog: Option<Arc<CatalogClient>>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build the shared state from a configuration
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let checkout = CheckoutService::new(config.mercadopago.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize Mercado Pago: {}", e))?;

        let catalog = match config.products_csv_url.as_deref() {
            Some(url) => {
                let client = CatalogClient::new(url)
                    .map_err(|e| anyhow::anyhow!("Failed to initialize catalog client: {}", e))?;
                Some(Arc::new(client))
            }
            None => {
                tracing::warn!("PRODUCTS_CSV_URL is not set; the products endpoint is disabled");
                None
            }
        };

        Ok(Self {
            checkout: Arc::new(checkout),
            catalog,
            config,
        })
    }

    /// Build the shared state from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(AppConfig::from_env())
    }
}
