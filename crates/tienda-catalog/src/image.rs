//! # Image URL Rewriter
//!
//! Sheet owners paste Google Drive share links, which do not render inside
//! `<img>` tags. Recognized Drive links are rewritten to the direct thumbnail
//! endpoint; every other URL passes through untouched.

use regex::Regex;
use std::sync::LazyLock;

const DRIVE_THUMBNAIL_SIZE: &str = "w1200";

static DRIVE_QUERY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)").expect("valid regex"));
static DRIVE_PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("valid regex"));

/// Normalize a single image cell: trim it, rewrite Drive share links, pass
/// everything else through. Blank cells become `None`.
pub fn normalize_image_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    if url.contains("drive.google.com") {
        return Some(drive_thumbnail(url));
    }
    Some(url.to_string())
}

/// Split a `|`-delimited gallery cell and normalize each entry, dropping
/// blanks
pub fn normalize_gallery(raw: &str) -> Vec<String> {
    raw.split('|').filter_map(normalize_image_url).collect()
}

/// Extract the Drive file id from either link shape and build the thumbnail
/// URL. Links without an extractable id stay as they are.
fn drive_thumbnail(url: &str) -> String {
    let id = DRIVE_QUERY_ID
        .captures(url)
        .or_else(|| DRIVE_PATH_ID.captures(url))
        .and_then(|captures| captures.get(1));

    match id {
        Some(m) => format!(
            "https://drive.google.com/thumbnail?id={}&sz={}",
            m.as_str(),
            DRIVE_THUMBNAIL_SIZE
        ),
        None => url.to_string(),
    }
}
