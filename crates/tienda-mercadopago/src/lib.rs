//! # tienda-mercadopago
//!
//! Mercado Pago Checkout Pro integration for the tienda storefront.
//!
//! The whole flow is one call: post the cart, get back a preference with its
//! redirect URLs, send the buyer there. Payment collection, card handling and
//! the result pages all live on Mercado Pago's side.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tienda_mercadopago::{CheckoutItem, CheckoutService};
//!
//! // Reads MP_ACCESS_TOKEN, URL / DEPLOY_PRIME_URL, MP_CURRENCY
//! let service = CheckoutService::from_env()?;
//!
//! let redirect = service
//!     .create_session(&CheckoutItem::from_cart(&cart), Some("buyer@example.com"))
//!     .await?;
//!
//! // Send the buyer to redirect.redirect_url()
//! ```

pub mod checkout;
pub mod config;
pub mod preference;

// Re-exports
pub use checkout::{CheckoutItem, CheckoutRedirect, CheckoutService};
pub use config::{LineItemPolicy, MercadoPagoConfig};
pub use preference::{BackUrls, Currency, PreferenceItem, PreferenceRequest, PreferenceResponse};
