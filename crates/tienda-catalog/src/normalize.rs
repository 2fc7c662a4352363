//! # Numeric and Text Normalization
//!
//! Sheet cells arrive as free text: `$ 45.000`, `1.234,56`, `Oud Real`.
//! These helpers turn them into numbers and URL-safe slugs without ever
//! failing; unusable input becomes `None` or an empty slug.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Parse a human-entered number in either `1.234,56` or `1,234.56` style.
///
/// Currency signs and other noise are ignored. Returns `None` for empty or
/// non-numeric input, never an error.
pub fn normalize_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) => {
            if comma > dot {
                // comma is the decimal separator, dots group thousands
                cleaned.replace('.', "").replace(',', ".")
            } else {
                // dot is the decimal separator, commas group thousands
                cleaned.replace(',', "")
            }
        }
        (Some(_), None) => single_comma(&cleaned),
        (None, Some(last_dot)) => single_dot(&cleaned, last_dot),
        (None, None) => cleaned,
    };

    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Commas only. Several commas always group thousands; a single comma is a
/// decimal separator unless more than two digits follow it (`45,000` reads as
/// forty-five thousand, `45,5` as forty-five and a half).
fn single_comma(cleaned: &str) -> String {
    if cleaned.matches(',').count() > 1 {
        return cleaned.replace(',', "");
    }
    match cleaned.split_once(',') {
        Some((int, frac)) if frac.len() <= 2 => format!("{int}.{frac}"),
        _ => cleaned.replace(',', ""),
    }
}

/// Dots only, mirrored disambiguation: with several dots the last one is the
/// decimal point, with a single dot it is only a decimal point when at most
/// two digits follow it.
fn single_dot(cleaned: &str, last_dot: usize) -> String {
    if cleaned.matches('.').count() > 1 {
        let (head, tail) = cleaned.split_at(last_dot);
        return format!("{}{}", head.replace('.', ""), tail);
    }
    if cleaned.len() - last_dot - 1 <= 2 {
        cleaned.to_string()
    } else {
        cleaned.replace('.', "")
    }
}

/// Build a URL-safe id from a product name: lowercase, diacritics stripped,
/// runs of anything non-alphanumeric collapsed to single hyphens.
///
/// Names with no usable characters slugify to an empty string; the caller
/// falls back to a positional id.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        for lower in c.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                slug.push(lower);
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_separator_styles_parse_the_same() {
        assert_eq!(normalize_number("1.234,56"), Some(1234.56));
        assert_eq!(normalize_number("1,234.56"), Some(1234.56));
        assert_eq!(normalize_number("1234.56"), Some(1234.56));
        assert_eq!(normalize_number("1234,56"), Some(1234.56));
    }

    #[test]
    fn test_plain_integers() {
        assert_eq!(normalize_number("98000"), Some(98000.0));
        assert_eq!(normalize_number("0"), Some(0.0));
        assert_eq!(normalize_number("-12"), Some(-12.0));
    }

    #[test]
    fn test_single_separator_with_three_digits_groups_thousands() {
        assert_eq!(normalize_number("45.000"), Some(45000.0));
        assert_eq!(normalize_number("45,000"), Some(45000.0));
        assert_eq!(normalize_number("1.234.567"), Some(1234.567));
        assert_eq!(normalize_number("1,234,567"), Some(1234567.0));
    }

    #[test]
    fn test_currency_noise_is_stripped() {
        assert_eq!(normalize_number("$ 45.000"), Some(45000.0));
        assert_eq!(normalize_number("ARS 1.234,56"), Some(1234.56));
        assert_eq!(normalize_number(" 12 "), Some(12.0));
    }

    #[test]
    fn test_unusable_input_is_none() {
        assert_eq!(normalize_number(""), None);
        assert_eq!(normalize_number("abc"), None);
        assert_eq!(normalize_number("   "), None);
        assert_eq!(normalize_number("-"), None);
        assert_eq!(normalize_number("1.2,3.4"), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Oud Real"), "oud-real");
        assert_eq!(slugify("Café Árabe Nº 5"), "cafe-arabe-n-5");
        assert_eq!(slugify("  ---  "), "");
        assert_eq!(slugify("UPPER_case 2"), "upper-case-2");
    }
}
