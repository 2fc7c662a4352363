//! # Checkout Pro Wire Types
//!
//! Request and response shapes for Mercado Pago's preference-creation
//! endpoint. Only the fields this store actually uses are modeled; the
//! provider sends plenty more and serde ignores it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Value Checkout Pro expects in `auto_return` to send the buyer straight
/// back after an approved payment
pub const AUTO_RETURN_APPROVED: &str = "approved";

/// Currencies accepted for this store's markets (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    ARS,
    BRL,
    CLP,
    COP,
    MXN,
    PEN,
    UYU,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::ARS => "ARS",
            Currency::BRL => "BRL",
            Currency::CLP => "CLP",
            Currency::COP => "COP",
            Currency::MXN => "MXN",
            Currency::PEN => "PEN",
            Currency::UYU => "UYU",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ARS" => Ok(Currency::ARS),
            "BRL" => Ok(Currency::BRL),
            "CLP" => Ok(Currency::CLP),
            "COP" => Ok(Currency::COP),
            "MXN" => Ok(Currency::MXN),
            "PEN" => Ok(Currency::PEN),
            "UYU" => Ok(Currency::UYU),
            other => Err(format!("unsupported currency: {other}")),
        }
    }
}

/// One line item in the preference
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    pub title: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub currency_id: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Buyer details, forwarded only for checkout prefill
#[derive(Debug, Clone, Serialize)]
pub struct Payer {
    pub email: String,
}

/// Redirect targets for the three checkout outcomes
#[derive(Debug, Clone, Serialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

impl BackUrls {
    /// Build the three callback URLs from the store's site URL
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            success: format!("{base}/checkout/success"),
            failure: format!("{base}/checkout/failure"),
            pending: format!("{base}/checkout/pending"),
        }
    }
}

/// Preference-creation request body
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    pub back_urls: BackUrls,
    pub auto_return: &'static str,
}

impl PreferenceRequest {
    pub fn new(items: Vec<PreferenceItem>, payer: Option<Payer>, back_urls: BackUrls) -> Self {
        Self {
            items,
            payer,
            back_urls,
            auto_return: AUTO_RETURN_APPROVED,
        }
    }
}

/// Fields of the provider's success response this store consumes
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceResponse {
    #[serde(default)]
    pub id: Option<String>,

    /// Production checkout URL
    #[serde(default)]
    pub init_point: Option<String>,

    /// Sandbox checkout URL, present alongside or instead of `init_point`
    #[serde(default)]
    pub sandbox_init_point: Option<String>,

    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
}

/// Provider error body; the shape varies, so every field is optional
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceErrorResponse {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub status: Option<u16>,
}

impl PreferenceErrorResponse {
    /// Best human-readable description the body offers
    pub fn description(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_urls_from_base() {
        let urls = BackUrls::from_base("https://tienda.example");
        assert_eq!(urls.success, "https://tienda.example/checkout/success");
        assert_eq!(urls.failure, "https://tienda.example/checkout/failure");
        assert_eq!(urls.pending, "https://tienda.example/checkout/pending");
    }

    #[test]
    fn test_back_urls_tolerate_trailing_slash() {
        let urls = BackUrls::from_base("https://tienda.example/");
        assert_eq!(urls.success, "https://tienda.example/checkout/success");
    }

    #[test]
    fn test_currency_round_trip() {
        assert_eq!("ars".parse::<Currency>().unwrap(), Currency::ARS);
        assert_eq!(Currency::MXN.to_string(), "MXN");
        assert!("XYZ".parse::<Currency>().is_err());

        let json = serde_json::to_value(Currency::ARS).unwrap();
        assert_eq!(json, "ARS");
    }

    #[test]
    fn test_request_serialization_skips_absent_fields() {
        let request = PreferenceRequest::new(
            vec![PreferenceItem {
                title: "Oud Real".into(),
                quantity: 1,
                unit_price: 45000.0,
                currency_id: Currency::ARS,
                picture_url: None,
            }],
            None,
            BackUrls::from_base("https://tienda.example"),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["auto_return"], "approved");
        assert_eq!(json["items"][0]["currency_id"], "ARS");
        assert!(json["items"][0].get("picture_url").is_none());
        assert!(json.get("payer").is_none());
    }

    #[test]
    fn test_response_tolerates_partial_bodies() {
        let response: PreferenceResponse =
            serde_json::from_str(r#"{"sandbox_init_point":"https://sandbox.mp/x"}"#).unwrap();
        assert!(response.id.is_none());
        assert!(response.init_point.is_none());
        assert_eq!(
            response.sandbox_init_point.as_deref(),
            Some("https://sandbox.mp/x")
        );
    }
}
