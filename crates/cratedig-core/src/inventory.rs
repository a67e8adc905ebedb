//! Inventory rows as read from the spreadsheet and their normalized query form.

use rust_decimal::Decimal;

/// One record of the input sheet. Immutable once read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryRow {
    /// 1-based data row index (header excluded).
    pub row_number: usize,
    pub artist: String,
    pub title: String,
    /// Free-text price, e.g. `"$25,000.00"` or `"12 USD"`.
    pub reference_price: String,
    pub country: Option<String>,
    pub catalog_number: Option<String>,
    pub label: Option<String>,
    /// Format hint such as `"LP"`, `"45"`, `"Mono"`.
    pub format_hint: Option<String>,
    /// Local path or URL of the center label photo.
    pub center_label_photo: Option<String>,
    pub media_condition: String,
    pub sleeve_condition: String,
    /// Catalog-number-like text read from the center label, if supplied by the sheet.
    pub ocr_hint: Option<String>,
    /// Free-text grading notes shown with the listing.
    pub condition_description: Option<String>,
    /// Date the item was shelved, as typed in the sheet.
    pub inventory_date: Option<String>,
}

/// Search-ready view of an [`InventoryRow`]. Rebuilt per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Artist with a leading `"The "` moved to the end; also the display form.
    pub canonical_artist: String,
    pub title: String,
    pub catalog: Option<String>,
    pub country: Option<String>,
    pub label: Option<String>,
    pub format_hint: Option<String>,
    /// Sanitized OCR catalog hint, scored as a substring of candidate catalog numbers.
    pub catalog_hint: Option<String>,
}

/// Output of the input normalizer: the query plus the cleaned reference price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub query: NormalizedQuery,
    /// Parsed reference price, or the configured floor when absent/unparseable.
    pub reference_price: Decimal,
    /// Whether `reference_price` came from the sheet rather than the floor.
    pub reference_price_parsed: bool,
}
