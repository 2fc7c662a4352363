//! # Column Resolver
//!
//! Published sheets get renamed and rearranged by their owners; the resolver
//! maps whatever headers are present onto the fixed product schema. The
//! synonym lists below are a contract with the spreadsheet owners: order
//! decides precedence, and entries must not be removed casually.

use std::collections::HashMap;

pub const NAME_COLUMNS: &[&str] = &["nombre", "name", "producto", "titulo", "title"];
pub const ID_COLUMNS: &[&str] = &["id", "sku", "codigo", "code", "ref"];
pub const PRICE_COLUMNS: &[&str] = &["precio", "price", "importe"];
pub const STOCK_COLUMNS: &[&str] = &["stock", "cantidad", "qty", "inventory"];
pub const DESCRIPTION_COLUMNS: &[&str] = &["descripcion", "description", "desc"];
pub const BRAND_COLUMNS: &[&str] = &["marca", "brand"];
pub const NOTES_COLUMNS: &[&str] = &["notas", "notes", "acorde", "acordes"];
pub const CATEGORY_COLUMNS: &[&str] = &["categoria", "category", "coleccion", "collection"];
pub const SELLER_COLUMNS: &[&str] = &["vendedor", "seller", "seller_id"];
pub const IMAGE_COLUMNS: &[&str] = &[
    "imagen", "image", "img", "foto", "imagen_1", "imagen1", "image_1",
];
pub const GALLERY_COLUMNS: &[&str] = &["imagenes", "images", "gallery", "galeria"];

/// Return the value of the first candidate column present in `row` with a
/// non-blank value. The value comes back untrimmed; callers that need a
/// trimmed string trim it themselves.
pub fn pick<'a>(row: &'a HashMap<String, String>, candidates: &[&str]) -> Option<&'a str> {
    for key in candidates {
        if let Some(value) = row.get(*key) {
            if !value.trim().is_empty() {
                return Some(value.as_str());
            }
        }
    }
    None
}
