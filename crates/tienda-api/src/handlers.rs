//! # Request Handlers
//!
//! Axum request handlers for the storefront API: checkout-session creation,
//! catalog listing, and health.

use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tienda_core::StoreError;
use tienda_mercadopago::CheckoutItem;
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout-session request
#[derive(Debug, Default, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Cart lines to charge for
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    /// Buyer details, forwarded for prefill only
    #[serde(default)]
    pub buyer: Option<Buyer>,
}

/// Buyer details
#[derive(Debug, Default, Deserialize)]
pub struct Buyer {
    #[serde(default)]
    pub email: Option<String>,
}

/// Create checkout-session response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Preference ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Production checkout URL (redirect the buyer here)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_point: Option<String>,
    /// Sandbox checkout URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandbox_init_point: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn store_error_to_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = ErrorResponse::new(err.to_string());
    if let Some(details) = err.details() {
        response = response.with_details(details);
    }
    (status, Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "tienda",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// CORS preflight for the checkout route
pub async fn checkout_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Create a hosted-checkout session for the posted cart.
///
/// The body is parsed by hand so a malformed payload still gets the JSON
/// error shape storefront clients expect.
#[instrument(skip(state, body))]
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request: CreateCheckoutRequest = serde_json::from_slice(&body).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Invalid body: a JSON object was expected")),
        )
    })?;

    if request.items.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "items is required: an array with at least one product",
            )),
        ));
    }

    let buyer_email = request
        .buyer
        .as_ref()
        .and_then(|buyer| buyer.email.as_deref());

    let redirect = state
        .checkout
        .create_session(&request.items, buyer_email)
        .await
        .map_err(|e| {
            error!("Failed to create checkout session: {}", e);
            store_error_to_response(e)
        })?;

    info!(
        "Created checkout session: id={}",
        redirect.id.as_deref().unwrap_or("unknown")
    );

    Ok(Json(CreateCheckoutResponse {
        id: redirect.id,
        init_point: redirect.init_point,
        sandbox_init_point: redirect.sandbox_init_point,
    }))
}

/// List products freshly ingested from the published sheet
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let catalog = state.catalog.as_ref().ok_or_else(|| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(
                "PRODUCTS_CSV_URL is not set; the products endpoint is disabled",
            )),
        )
    })?;

    let products = catalog.fetch().await.map_err(|e| {
        error!("Catalog load failed: {}", e);
        store_error_to_response(e)
    })?;

    Ok(Json(serde_json::json!({
        "products": products,
        "count": products.len()
    })))
}
