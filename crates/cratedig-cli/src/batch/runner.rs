//! Sequential batch: normalize, match, derive, write.
//!
//! Rows are processed strictly in sheet order, one at a time. Per-row
//! failures go to the reject stream; only I/O on the output files aborts
//! the batch.

use std::io::Write;

use cratedig_core::{normalize_row, InventoryRow};
use cratedig_listing::ListingBuilder;
use cratedig_matcher::{CancelFlag, Catalog, HintExtractor, MatchResult, Matcher};
use rust_decimal::Decimal;

use super::export::{ProductWriter, RejectWriter};
use super::input::InputSheet;

pub(crate) const MALFORMED_ROW: &str = "MALFORMED_ROW";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    /// Rows fully processed (matched plus unmatched).
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub output_rows: usize,
    pub total_final_price: Decimal,
    /// Sum of reference prices that parsed from the sheet.
    pub total_reference_price: Decimal,
    pub api_calls: u64,
    pub retries: u64,
    pub cancelled: bool,
}

impl BatchSummary {
    pub(crate) fn price_diff(&self) -> Decimal {
        self.total_final_price - self.total_reference_price
    }
}

/// Output sinks and per-batch state for [`run_batch`].
pub(crate) struct BatchSinks<'a, P: Write, R: Write> {
    pub builder: &'a mut ListingBuilder,
    pub products: &'a mut ProductWriter<P>,
    pub rejects: &'a mut RejectWriter<R>,
}

/// OCR hint for a row's center label photo, when the sheet supplies none.
async fn center_label_hint<H>(hints: &H, row: &InventoryRow) -> Option<String>
where
    H: HintExtractor + ?Sized,
{
    if row.ocr_hint.is_some() {
        return None;
    }
    let photo = row.center_label_photo.as_deref()?;
    match hints.extract_hint(photo).await {
        Ok(hint) => {
            if let Some(hint) = &hint {
                tracing::debug!(row = row.row_number, hint = %hint, "center label hint");
            }
            hint
        }
        Err(e) => {
            tracing::warn!(
                row = row.row_number,
                error = %e,
                "center label OCR failed; continuing without hint"
            );
            None
        }
    }
}

/// Runs every sheet row through the pipeline.
///
/// Stops early when `cancel` is set or `limit` matched rows have been
/// written. The row in flight at cancellation is neither written nor
/// counted.
///
/// # Errors
///
/// Returns an error only when writing an output file fails.
pub(crate) async fn run_batch<C, H, P, R>(
    sheet: &InputSheet,
    matcher: &Matcher<C>,
    hints: &H,
    sinks: BatchSinks<'_, P, R>,
    limit: Option<usize>,
    cancel: &CancelFlag,
) -> anyhow::Result<BatchSummary>
where
    C: Catalog,
    H: HintExtractor + ?Sized,
    P: Write,
    R: Write,
{
    let BatchSinks {
        builder,
        products,
        rejects,
    } = sinks;
    let floor = builder.options().price_floor;
    let mut summary = BatchSummary::default();

    for record in &sheet.records {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        if limit.is_some_and(|n| summary.matched >= n) {
            tracing::info!(limit = ?limit, "match limit reached");
            break;
        }

        let row = &record.row;
        let extracted = center_label_hint(hints, row).await;
        let normalized = match normalize_row(row, extracted.as_deref(), floor) {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::warn!(row = row.row_number, error = %e, "malformed row rejected");
                rejects.write(&record.raw, MALFORMED_ROW, &[], &e.to_string())?;
                summary.unmatched += 1;
                continue;
            }
        };

        let Ok(outcome) = matcher.match_row(&normalized.query, cancel).await else {
            tracing::warn!(row = row.row_number, "batch cancelled mid-row");
            summary.cancelled = true;
            break;
        };

        match outcome {
            MatchResult::Matched {
                release, score, ..
            } => {
                let listing = builder.build(row, &normalized, &release);
                products.write(&listing.rows)?;

                summary.matched += 1;
                summary.output_rows += listing.rows.len();
                summary.total_final_price += listing.attributes.price.final_price;
                if normalized.reference_price_parsed {
                    summary.total_reference_price += normalized.reference_price;
                }
                tracing::info!(
                    row = row.row_number,
                    release_id = release.release_id,
                    score,
                    handle = %listing.handle,
                    price = %listing.attributes.price.final_price,
                    strategy = %listing.attributes.price.strategy,
                    "row matched"
                );
            }
            MatchResult::NoMatch {
                reason,
                detail,
                attempted,
            } => {
                rejects.write(&record.raw, reason.code(), &attempted, &detail)?;
                summary.unmatched += 1;
                tracing::info!(
                    row = row.row_number,
                    reason = %reason,
                    detail = %detail,
                    "row unmatched"
                );
            }
        }
    }

    summary.total = summary.matched + summary.unmatched;
    Ok(summary)
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
