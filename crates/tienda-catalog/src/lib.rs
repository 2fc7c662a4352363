//! # tienda-catalog
//!
//! Catalog ingestion for the tienda storefront.
//!
//! The catalog lives in a spreadsheet its owners publish as CSV. Columns move
//! around, numbers are typed in whatever locale the owner thinks in, and image
//! cells hold Google Drive share links. This crate fetches the sheet and turns
//! it into clean [`tienda_core::Product`] rows:
//!
//! - `ingest::CatalogClient` fetches and parses the published CSV
//! - `columns::pick` resolves header synonyms (`nombre`/`name`/`producto`, ...)
//! - `normalize::normalize_number` handles both `1.234,56` and `1,234.56`
//! - `image::normalize_image_url` rewrites Drive share links to thumbnails

pub mod columns;
pub mod image;
pub mod ingest;
pub mod normalize;

// Re-exports for convenience
pub use columns::pick;
pub use image::{normalize_gallery, normalize_image_url};
pub use ingest::{parse_products, CatalogClient, CatalogParse};
pub use normalize::{normalize_number, slugify};
