//! Input normalization: artist canonical form, price cleaning, catalog sanitizing.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::inventory::{InventoryRow, NormalizedQuery, NormalizedRow};

/// Default price floor in the store currency (2.50).
pub const DEFAULT_PRICE_FLOOR: Decimal = Decimal::from_parts(250, 0, 0, false, 2);

const ARTICLE_PREFIX: &str = "The ";
const ARTICLE_SUFFIX: &str = ", The";

/// First unsigned decimal amount in a price cell. Thousands separators are
/// removed before matching.
static PRICE_AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));

/// Moves a single leading `"The "` to the end: `"The Beatles"` → `"Beatles, The"`.
///
/// The prefix match is case-sensitive. The transform is idempotent: a value
/// already ending in `", The"` is returned unchanged, so applying it twice
/// never yields `"…, The, The"`.
#[must_use]
pub fn canonical_artist(artist: &str) -> String {
    let trimmed = artist.trim();
    if trimmed.ends_with(ARTICLE_SUFFIX) {
        return trimmed.to_owned();
    }
    match trimmed.strip_prefix(ARTICLE_PREFIX) {
        Some(rest) if !rest.trim().is_empty() => format!("{}{ARTICLE_SUFFIX}", rest.trim()),
        _ => trimmed.to_owned(),
    }
}

/// Parses a free-text price, dropping currency symbols, ISO codes, and
/// thousands separators.
///
/// Only the first numeric run counts: `"Rs. 500"` is 500 and a range such as
/// `"10 - 12"` yields its low end. Returns `None` when the text holds no digits.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let without_separators = raw.replace(',', "");
    let amount = PRICE_AMOUNT_RE.find(&without_separators)?;
    Decimal::from_str(amount.as_str()).ok()
}

/// Like [`parse_price`] but falls back to `floor` for absent or unparseable text.
#[must_use]
pub fn clean_price(raw: &str, floor: Decimal) -> Decimal {
    parse_price(raw).unwrap_or(floor)
}

/// Returns a trimmed catalog number, or `None` when it is blank or looks
/// like a bare year (1900–2029), a common misread of the label's date line.
#[must_use]
pub fn sanitize_catalog(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let looks_like_year = compact.len() == 4
        && compact.chars().all(|c| c.is_ascii_digit())
        && compact
            .parse::<u16>()
            .is_ok_and(|year| (1900..=2029).contains(&year));
    if looks_like_year {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Normalizes one inventory row into a search query and a cleaned price.
///
/// `extracted_hint` is an OCR hint obtained from the center label photo; a
/// hint already present on the row takes precedence over it.
///
/// # Errors
///
/// Returns [`CoreError::MalformedRow`] when artist or title is blank after
/// trimming. Such rows must not reach the catalog.
pub fn normalize_row(
    row: &InventoryRow,
    extracted_hint: Option<&str>,
    price_floor: Decimal,
) -> Result<NormalizedRow, CoreError> {
    let artist = row.artist.trim();
    let title = row.title.trim();
    let missing = match (artist.is_empty(), title.is_empty()) {
        (true, true) => Some("artist and title"),
        (true, false) => Some("artist"),
        (false, true) => Some("title"),
        (false, false) => None,
    };
    if let Some(missing) = missing {
        return Err(CoreError::MalformedRow {
            row: row.row_number,
            missing,
        });
    }

    let catalog_hint = row
        .ocr_hint
        .as_deref()
        .or(extracted_hint)
        .and_then(sanitize_catalog);
    let catalog = row
        .catalog_number
        .as_deref()
        .and_then(sanitize_catalog)
        .or_else(|| catalog_hint.clone());

    let non_blank = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    let query = NormalizedQuery {
        canonical_artist: canonical_artist(artist),
        title: title.to_owned(),
        catalog,
        country: non_blank(&row.country),
        label: non_blank(&row.label),
        format_hint: non_blank(&row.format_hint),
        catalog_hint,
    };

    let parsed = parse_price(&row.reference_price);

    Ok(NormalizedRow {
        query,
        reference_price: parsed.unwrap_or(price_floor),
        reference_price_parsed: parsed.is_some(),
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
