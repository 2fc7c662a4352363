//! # Catalog Ingestor
//!
//! Fetches the published spreadsheet as CSV and turns its rows into products.
//! A single bad row never aborts a load: rejected records are collected and
//! logged while the surviving rows come back in sheet order.

use crate::columns::{self, pick};
use crate::image::{normalize_gallery, normalize_image_url};
use crate::normalize::{normalize_number, slugify};
use csv::{ReaderBuilder, StringRecord};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tienda_core::{Product, StoreError, StoreResult};
use tracing::{debug, instrument, warn};

/// Timeout for the catalog fetch
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for a catalog published as CSV
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    csv_url: String,
}

impl CatalogClient {
    /// Create a client reading from the published CSV at `csv_url`
    pub fn new(csv_url: impl Into<String>) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("tienda/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            csv_url: csv_url.into(),
        })
    }

    /// Source URL this client reads from
    pub fn csv_url(&self) -> &str {
        &self.csv_url
    }

    /// Fetch the sheet and return the valid products in row order.
    ///
    /// Sends `Cache-Control: no-cache` so edits made by the sheet owner show
    /// up on the next load instead of whenever the publisher's cache expires.
    #[instrument(skip(self), fields(url = %self.csv_url))]
    pub async fn fetch(&self) -> StoreResult<Vec<Product>> {
        let response = self
            .client
            .get(&self.csv_url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| StoreError::Fetch {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Fetch {
                status: Some(status.as_u16()),
                message: format!("catalog source answered {status}"),
            });
        }

        let text = response.text().await.map_err(|e| StoreError::Fetch {
            status: None,
            message: e.to_string(),
        })?;

        let parsed = parse_products(&text)?;
        for issue in &parsed.row_errors {
            warn!("skipping malformed catalog row: {issue}");
        }
        debug!(
            products = parsed.products.len(),
            rejected = parsed.row_errors.len(),
            "catalog loaded"
        );

        Ok(parsed.products)
    }
}

/// Outcome of parsing a catalog sheet: the products that survived, plus one
/// message per record the CSV reader rejected outright
#[derive(Debug, Default)]
pub struct CatalogParse {
    pub products: Vec<Product>,
    pub row_errors: Vec<String>,
}

/// Parse CSV text (first row is the header) into products.
///
/// Rows missing a non-empty name or a parseable non-negative price are data
/// entry leftovers and are dropped without an error.
pub fn parse_products(text: &str) -> StoreResult<CatalogParse> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| StoreError::Parse(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut parse = CatalogParse::default();
    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) => parse
                .products
                .extend(product_from_row(&headers, &record, index)),
            Err(e) => parse.row_errors.push(format!("row {}: {e}", index + 1)),
        }
    }

    Ok(parse)
}

/// Zip the header row with one record. Short records leave columns absent,
/// long ones have their extra fields ignored.
fn row_map(headers: &[String], record: &StringRecord) -> HashMap<String, String> {
    headers
        .iter()
        .cloned()
        .zip(record.iter().map(str::to_string))
        .collect()
}

fn product_from_row(headers: &[String], record: &StringRecord, index: usize) -> Option<Product> {
    let row = row_map(headers, record);

    let name = pick(&row, columns::NAME_COLUMNS)
        .map(str::trim)
        .unwrap_or_default();
    let price = match pick(&row, columns::PRICE_COLUMNS).and_then(normalize_number) {
        Some(price) if price >= 0.0 => price,
        _ => return None,
    };
    if name.is_empty() {
        return None;
    }

    let id = pick(&row, columns::ID_COLUMNS)
        .map(str::to_string)
        .or_else(|| {
            let slug = slugify(name);
            (!slug.is_empty()).then_some(slug)
        })
        .unwrap_or_else(|| format!("prod-{}", index + 1));

    Some(Product {
        id,
        name: name.to_string(),
        price,
        stock: pick(&row, columns::STOCK_COLUMNS)
            .and_then(normalize_number)
            .filter(|stock| *stock >= 0.0),
        description: pick(&row, columns::DESCRIPTION_COLUMNS).map(str::to_string),
        brand: pick(&row, columns::BRAND_COLUMNS).map(str::to_string),
        notes: pick(&row, columns::NOTES_COLUMNS).map(str::to_string),
        category: pick(&row, columns::CATEGORY_COLUMNS).map(str::to_string),
        image: pick(&row, columns::IMAGE_COLUMNS).and_then(normalize_image_url),
        images: pick(&row, columns::GALLERY_COLUMNS)
            .map(normalize_gallery)
            .unwrap_or_default(),
        seller: pick(&row, columns::SELLER_COLUMNS).map(str::to_string),
    })
}
