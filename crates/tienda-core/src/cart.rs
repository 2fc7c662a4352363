//! # Cart Store
//!
//! Pure operations over an ordered list of cart lines. None of these mutate
//! their input; each returns the next cart state, which keeps them trivial to
//! test and lets callers decide when to persist.

use crate::product::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage key the serialized cart is persisted under
pub const CART_STORAGE_KEY: &str = "perfume_cart_v1";

/// A line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID
    pub id: String,

    /// Product name (denormalized for display)
    pub name: String,

    /// Unit price captured when the item was added, not re-fetched later
    pub price: f64,

    /// Quantity, always at least 1
    pub qty: u32,

    /// Optional image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Snapshot a catalog product into a cart line
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            qty: qty.max(1),
            image: product.image.clone(),
        }
    }

    /// Price times quantity for this line
    pub fn subtotal(&self) -> f64 {
        self.price * self.qty as f64
    }
}

/// Add `qty` units of `product`, accumulating onto an existing line.
///
/// A line already holding the product keeps its position and gains quantity;
/// otherwise a snapshot of the product is appended.
pub fn add(items: &[CartItem], product: &Product, qty: u32) -> Vec<CartItem> {
    let qty = qty.max(1);
    let mut next = items.to_vec();
    match next.iter_mut().find(|item| item.id == product.id) {
        Some(existing) => existing.qty = existing.qty.saturating_add(qty),
        None => next.push(CartItem::from_product(product, qty)),
    }
    next
}

/// Remove the line with `id`; unknown ids leave the cart unchanged
pub fn remove(items: &[CartItem], id: &str) -> Vec<CartItem> {
    items
        .iter()
        .filter(|item| item.id != id)
        .cloned()
        .collect()
}

/// Set the quantity for `id`, truncating fractions and clamping to 1.
///
/// Quantities come straight from an input field, so anything below one
/// (including garbage that parsed to NaN) becomes one unit.
pub fn set_quantity(items: &[CartItem], id: &str, qty: f64) -> Vec<CartItem> {
    let qty = clamp_quantity(qty);
    items
        .iter()
        .map(|item| {
            if item.id == id {
                CartItem {
                    qty,
                    ..item.clone()
                }
            } else {
                item.clone()
            }
        })
        .collect()
}

/// Sum of price times quantity across the cart; zero when empty
pub fn total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::subtotal).sum()
}

fn clamp_quantity(qty: f64) -> u32 {
    if !qty.is_finite() || qty < 1.0 {
        return 1;
    }
    qty.trunc().min(u32::MAX as f64) as u32
}

// ============================================================================
// Persistence
// ============================================================================

/// Durable string slot the cart snapshots into: browser local storage in the
/// storefront, an in-memory map in tests.
pub trait CartStorage {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String);
}

/// In-memory storage backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.slots.insert(key.to_string(), value);
    }
}

/// Load the persisted cart; missing or corrupt state degrades to empty
pub fn load_cart(storage: &dyn CartStorage) -> Vec<CartItem> {
    storage
        .get(CART_STORAGE_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Snapshot the cart under the fixed storage key
pub fn save_cart(storage: &mut dyn CartStorage, items: &[CartItem]) {
    if let Ok(raw) = serde_json::to_string(items) {
        storage.set(CART_STORAGE_KEY, raw);
    }
}
