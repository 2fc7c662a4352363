//! # Store Error Types
//!
//! Typed error handling for the tienda storefront core.
//! All fallible catalog and checkout operations return `Result<T, StoreError>`.

use thiserror::Error;

/// Core error type for catalog and checkout operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration errors (missing credential, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catalog source unreachable or answered with a non-success status
    #[error("Catalog fetch failed: {message}")]
    Fetch { status: Option<u16>, message: String },

    /// Catalog text could not be read as delimited rows at all
    #[error("Catalog parse error: {0}")]
    Parse(String),

    /// Checkout requested with no billable items
    #[error("Cart is empty: at least one item is required")]
    EmptyCart,

    /// A line item failed checkout validation
    #[error("Invalid item at index {index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    /// Payment provider call failed (transport error or non-success response)
    #[error("Mercado Pago: {message}")]
    Provider {
        message: String,
        details: Option<String>,
    },

    /// Provider accepted the preference but returned no redirect URL
    #[error("Payment provider returned no redirect URL")]
    NoRedirectUrl,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Returns true if retrying the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::Fetch { .. } | StoreError::Provider { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Configuration(_) => 500,
            StoreError::InvalidRequest(_) => 400,
            StoreError::Fetch { .. } => 502,
            StoreError::Parse(_) => 502,
            StoreError::EmptyCart => 400,
            StoreError::InvalidItem { .. } => 400,
            StoreError::Provider { .. } => 500,
            StoreError::NoRedirectUrl => 500,
            StoreError::Serialization(_) => 500,
        }
    }

    /// Extra context safe to forward to API clients, when the error carries any
    pub fn details(&self) -> Option<&str> {
        match self {
            StoreError::Provider { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
