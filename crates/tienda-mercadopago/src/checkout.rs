//! # Checkout Sessions
//!
//! Creates Mercado Pago Checkout Pro preferences. This is the only payment
//! flow tienda has: the buyer's cart is submitted in a single authenticated
//! call, and the buyer is redirected to the hosted checkout page.
//!
//! There is no retry and no idempotency key. Every call mints a new, distinct
//! preference; an abandoned preference is never charged.

use crate::config::{LineItemPolicy, MercadoPagoConfig};
use crate::preference::{
    BackUrls, Payer, PreferenceErrorResponse, PreferenceItem, PreferenceRequest,
    PreferenceResponse,
};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tienda_core::{CartItem, StoreError, StoreResult};
use tracing::{debug, error, info, instrument};

/// A checkout line as posted by the storefront. Everything is optional;
/// coercion happens server-side so a half-broken client still gets a usable
/// checkout or a clear error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutItem {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub quantity: Option<f64>,

    #[serde(default)]
    pub unit_price: Option<f64>,

    #[serde(default)]
    pub picture_url: Option<String>,
}

impl CheckoutItem {
    /// Convert a whole cart into checkout lines
    pub fn from_cart(items: &[CartItem]) -> Vec<Self> {
        items.iter().map(Self::from).collect()
    }
}

impl From<&CartItem> for CheckoutItem {
    fn from(item: &CartItem) -> Self {
        Self {
            title: Some(item.name.clone()),
            quantity: Some(item.qty as f64),
            unit_price: Some(item.price),
            picture_url: item.image.clone(),
        }
    }
}

/// Redirect targets minted by a successful preference creation
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRedirect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Production checkout URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_point: Option<String>,

    /// Sandbox checkout URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox_init_point: Option<String>,
}

impl CheckoutRedirect {
    /// The URL the buyer should be sent to, preferring the production
    /// init point over the sandbox one. At least one is always present.
    pub fn redirect_url(&self) -> Option<&str> {
        self.init_point
            .as_deref()
            .or(self.sandbox_init_point.as_deref())
    }
}

/// Creates hosted-checkout sessions against Mercado Pago's Checkout Pro
pub struct CheckoutService {
    config: MercadoPagoConfig,
    client: Client,
}

impl CheckoutService {
    /// Create the service around an injected configuration
    pub fn new(config: MercadoPagoConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> StoreResult<Self> {
        Self::new(MercadoPagoConfig::from_env())
    }

    /// The configuration this service was built with
    pub fn config(&self) -> &MercadoPagoConfig {
        &self.config
    }

    /// Create a payment preference for `items` and return its redirect URLs.
    ///
    /// `buyer_email` is forwarded for checkout prefill only; blank values are
    /// dropped. The credential is validated lazily so that a misconfigured
    /// server boots fine and fails per request with a clear error.
    #[instrument(skip(self, items, buyer_email), fields(items = items.len()))]
    pub async fn create_session(
        &self,
        items: &[CheckoutItem],
        buyer_email: Option<&str>,
    ) -> StoreResult<CheckoutRedirect> {
        if items.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let auth_header = self.config.auth_header().ok_or_else(|| {
            StoreError::Configuration(
                "MP_ACCESS_TOKEN is not set; configure it to enable checkout".to_string(),
            )
        })?;

        let line_items = self.build_line_items(items)?;
        let payer = buyer_email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(|email| Payer {
                email: email.to_string(),
            });

        let request = PreferenceRequest::new(
            line_items,
            payer,
            BackUrls::from_base(&self.config.site_url),
        );

        debug!(
            "Creating Mercado Pago preference: {} items, currency={}",
            request.items.len(),
            self.config.currency_id
        );

        let url = format!("{}/checkout/preferences", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| StoreError::Provider {
                message: "could not create the preference".to_string(),
                details: Some(e.to_string()),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| StoreError::Provider {
            message: "could not read the provider response".to_string(),
            details: Some(e.to_string()),
        })?;

        if !status.is_success() {
            error!("Mercado Pago API error: status={}, body={}", status, body);

            let details = serde_json::from_str::<PreferenceErrorResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.description().map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {status}"));

            return Err(StoreError::Provider {
                message: "could not create the preference".to_string(),
                details: Some(details),
            });
        }

        let preference: PreferenceResponse = serde_json::from_str(&body).map_err(|e| {
            StoreError::Serialization(format!("failed to parse Mercado Pago response: {e}"))
        })?;

        if preference.init_point.is_none() && preference.sandbox_init_point.is_none() {
            return Err(StoreError::NoRedirectUrl);
        }

        info!(
            "Created Mercado Pago preference: id={}",
            preference.id.as_deref().unwrap_or("unknown")
        );

        Ok(CheckoutRedirect {
            id: preference.id,
            init_point: preference.init_point,
            sandbox_init_point: preference.sandbox_init_point,
        })
    }

    /// Coerce raw checkout lines into preference items, applying the
    /// configured policy to lines whose price comes out non-positive.
    fn build_line_items(&self, items: &[CheckoutItem]) -> StoreResult<Vec<PreferenceItem>> {
        let mut line_items = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let title = item
                .title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .unwrap_or("Producto")
                .to_string();
            let unit_price = coerce_price(item.unit_price);

            if unit_price <= 0.0 {
                match self.config.line_item_policy {
                    LineItemPolicy::Reject => {
                        return Err(StoreError::InvalidItem {
                            index,
                            reason: format!("\"{title}\" has no positive unit price"),
                        });
                    }
                    LineItemPolicy::Drop => continue,
                }
            }

            line_items.push(PreferenceItem {
                title,
                quantity: coerce_quantity(item.quantity),
                unit_price,
                currency_id: self.config.currency_id,
                picture_url: item.picture_url.clone().filter(|url| !url.is_empty()),
            });
        }

        if line_items.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        Ok(line_items)
    }
}

/// Quantities arrive as arbitrary JSON numbers; truncate and clamp so the
/// provider always sees at least one whole unit
fn coerce_quantity(raw: Option<f64>) -> u32 {
    match raw {
        Some(qty) if qty.is_finite() && qty >= 1.0 => qty.trunc().min(u32::MAX as f64) as u32,
        _ => 1,
    }
}

/// Missing, negative or non-finite prices become zero so the line-item
/// policy decides what happens to them
fn coerce_price(raw: Option<f64>) -> f64 {
    match raw {
        Some(price) if price.is_finite() && price > 0.0 => price,
        _ => 0.0,
    }
}
