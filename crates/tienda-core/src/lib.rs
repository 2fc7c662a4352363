//! # tienda-core
//!
//! Core types for the tienda storefront.
//!
//! This crate provides:
//! - `Product` for catalog rows ingested from the published sheet
//! - `CartItem` and the pure cart operations (`add`, `remove`, `set_quantity`, `total`)
//! - `CartStorage` for cart persistence
//! - `StoreError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use tienda_core::{cart, CartItem, MemoryStorage, Product};
//!
//! let oud = Product::new("oud-real", "Oud Real", 45000.0);
//!
//! // Grow the cart without mutating previous states
//! let items = cart::add(&[], &oud, 1);
//! let items = cart::add(&items, &oud, 2);
//! assert_eq!(cart::total(&items), 135000.0);
//!
//! // Snapshot it into durable storage
//! let mut storage = MemoryStorage::new();
//! cart::save_cart(&mut storage, &items);
//! ```

pub mod cart;
pub mod error;
pub mod product;

// Re-exports for convenience
pub use cart::{CartItem, CartStorage, MemoryStorage, CART_STORAGE_KEY};
pub use error::{StoreError, StoreResult};
pub use product::Product;
