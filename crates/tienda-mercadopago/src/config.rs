//! # Mercado Pago Configuration
//!
//! Configuration for the Checkout Pro integration. Everything is resolved
//! once, at construction, and injected into the service; request handling
//! never reads ambient state. A missing access token is not a startup error:
//! the rest of the service keeps working and only checkout calls fail.

use crate::preference::Currency;
use std::env;
use std::time::Duration;

/// Checkout Pro API host
const DEFAULT_API_BASE_URL: &str = "https://api.mercadopago.com";

/// Site URL fallback for local development
const DEFAULT_SITE_URL: &str = "http://localhost:8888";

/// Bound on the single outbound preference-creation call
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// How line items whose coerced price is not positive are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineItemPolicy {
    /// Fail the checkout, naming the offending item
    #[default]
    Reject,
    /// Drop such items and submit the rest
    Drop,
}

/// Mercado Pago API configuration
#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    /// Access token (APP_USR-... or TEST-...). `None` keeps the server
    /// bootable; checkout calls then fail with a configuration error.
    pub access_token: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Public site URL the buyer is sent back to after paying
    pub site_url: String,

    /// Currency all line items are charged in
    pub currency_id: Currency,

    /// Zero-price line-item policy
    pub line_item_policy: LineItemPolicy,

    /// Timeout for the preference-creation call
    pub timeout: Duration,
}

impl MercadoPagoConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `MP_ACCESS_TOKEN` (may be absent), the site URL from `URL` then
    /// `DEPLOY_PRIME_URL`, the currency from `MP_CURRENCY`, and the zero-price
    /// policy from `CHECKOUT_ITEM_POLICY` (`reject` | `drop`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from a key lookup; `from_env` passes the process environment
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let access_token = lookup("MP_ACCESS_TOKEN").filter(|token| !token.trim().is_empty());

        let site_url = lookup("URL")
            .or_else(|| lookup("DEPLOY_PRIME_URL"))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

        let currency_id = lookup("MP_CURRENCY")
            .and_then(|code| code.parse().ok())
            .unwrap_or_default();

        let line_item_policy = match lookup("CHECKOUT_ITEM_POLICY").as_deref() {
            Some("drop") => LineItemPolicy::Drop,
            _ => LineItemPolicy::Reject,
        };

        Self {
            access_token,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            site_url,
            currency_id,
            line_item_policy,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create config with explicit values (for testing)
    pub fn new(access_token: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            site_url: site_url.into(),
            currency_id: Currency::default(),
            line_item_policy: LineItemPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Check if the configured token is a sandbox credential
    pub fn is_sandbox_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| token.starts_with("TEST-"))
    }

    /// Authorization header value, when a token is configured
    pub fn auth_header(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the zero-price line-item policy
    pub fn with_line_item_policy(mut self, policy: LineItemPolicy) -> Self {
        self.line_item_policy = policy;
        self
    }
}
