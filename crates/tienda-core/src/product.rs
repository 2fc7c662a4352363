//! # Product Types
//!
//! Catalog product rows as ingested from the published spreadsheet.
//! Only `id`, `name` and `price` are guaranteed; every other field is
//! present only when the sheet provides a usable value.

use serde::{Deserialize, Serialize};

/// A product in the storefront catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier: the sheet's id column, a slug of the name, or a
    /// positional fallback
    pub id: String,

    /// Display name, always non-empty
    pub name: String,

    /// Unit price in the store currency
    pub price: f64,

    /// Units in stock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<f64>,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Brand or house
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Scent notes / accords
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Category or collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Primary image URL, already rewritten for direct rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Additional gallery image URLs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    /// Seller identifier for multi-vendor sheets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
}

impl Product {
    /// Create a product with the required fields; the rest start absent
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: None,
            description: None,
            brand: None,
            notes: None,
            category: None,
            image: None,
            images: Vec::new(),
            seller: None,
        }
    }

    /// Builder: set the primary image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Builder: set the brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("oud-real", "Oud Real", 45000.0)
            .with_brand("Maison Alhambra")
            .with_image("https://cdn.example.com/oud.jpg");

        assert_eq!(product.id, "oud-real");
        assert_eq!(product.price, 45000.0);
        assert_eq!(product.brand.as_deref(), Some("Maison Alhambra"));
        assert!(product.stock.is_none());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let product = Product::new("p1", "Uno", 100.0);
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], "p1");
        assert_eq!(json["price"], 100.0);
        assert!(json.get("stock").is_none());
        assert!(json.get("image").is_none());
        assert!(json.get("images").is_none());
    }

    #[test]
    fn test_deserializes_with_minimal_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p2","name":"Dos","price":9.5}"#).unwrap();

        assert_eq!(product.name, "Dos");
        assert!(product.images.is_empty());
        assert!(product.seller.is_none());
    }
}
