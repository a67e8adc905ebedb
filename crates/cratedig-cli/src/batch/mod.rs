//! `run` and `columns` command handlers.

mod export;
mod input;
mod runner;

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, Utc};
use cratedig_core::{load_column_map, AppConfig, ColumnMap, LogicalField};
use cratedig_discogs::{DiscogsClient, RateGate};
use cratedig_listing::{ListingBuilder, ListingOptions};
use cratedig_matcher::{CancelFlag, CommandHints, HintExtractor, Matcher, NoHints};

use self::export::{reject_path, ProductWriter, RejectWriter};
use self::runner::{BatchSinks, BatchSummary};

fn column_map(path: Option<&Path>) -> anyhow::Result<ColumnMap> {
    Ok(match path {
        Some(path) => load_column_map(path)?,
        None => ColumnMap::default(),
    })
}

/// Match an inventory sheet and write the product and reject CSVs.
///
/// Both output files are created before the first row is processed, so a
/// batch always leaves two artifacts even when one stays empty.
///
/// # Errors
///
/// Returns an error if the sheet cannot be read, an output file cannot be
/// created or written, or the Discogs client cannot be built.
pub(crate) async fn run_match(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    limit: Option<usize>,
    cancel: &CancelFlag,
) -> anyhow::Result<()> {
    let map = column_map(config.columns_path.as_deref())?;
    let sheet = input::open_sheet(input, &map)?;

    let rejects_path = reject_path(output);
    let mut products = ProductWriter::create(output)?;
    let mut rejects = RejectWriter::create(&rejects_path, &sheet.headers)?;

    let gate = Arc::new(RateGate::from_millis(config.inter_call_delay_ms));
    let client = DiscogsClient::new(config, Arc::clone(&gate))?;
    let matcher = Matcher::new(client, config.candidates_per_query, config.min_match_score);
    let hints: Box<dyn HintExtractor> = match &config.ocr_command {
        Some(command) => Box::new(CommandHints::new(command.clone())),
        None => Box::new(NoHints),
    };
    let mut builder = ListingBuilder::new(ListingOptions {
        store_name: config.store_name.clone(),
        price_floor: config.price_floor,
        today: Local::now().date_naive(),
    });

    let started = Utc::now();
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows = sheet.records.len(),
        "batch started"
    );

    let sinks = BatchSinks {
        builder: &mut builder,
        products: &mut products,
        rejects: &mut rejects,
    };
    let mut summary =
        runner::run_batch(&sheet, &matcher, hints.as_ref(), sinks, limit, cancel).await?;
    summary.api_calls = gate.api_calls();
    summary.retries = gate.retries();

    let elapsed = Utc::now() - started;
    print_summary(&summary, output, &rejects_path, elapsed.num_seconds());
    Ok(())
}

fn print_summary(summary: &BatchSummary, output: &Path, rejects: &Path, elapsed_secs: i64) {
    let finished = Utc::now().format("%Y-%m-%d %H:%M UTC");
    println!("# Batch Summary");
    println!();
    println!("**Finished**: {finished} ({elapsed_secs}s)");
    if summary.cancelled {
        println!("**Status**: cancelled; files hold every row finished before the interrupt");
    }
    println!();
    println!("{:<22}{}", "rows processed", summary.total);
    println!("{:<22}{}", "matched", summary.matched);
    println!("{:<22}{}", "unmatched", summary.unmatched);
    println!("{:<22}{}", "product rows", summary.output_rows);
    println!("{:<22}{:.2}", "final price total", summary.total_final_price);
    println!("{:<22}{:.2}", "reference total", summary.total_reference_price);
    println!("{:<22}{:.2}", "difference", summary.price_diff());
    println!("{:<22}{}", "api calls", summary.api_calls);
    println!("{:<22}{}", "retries", summary.retries);
    println!();
    println!("products: {}", output.display());
    println!("rejects:  {}", rejects.display());
}

fn resolved_header(sheet: &input::InputSheet, field: LogicalField) -> &str {
    sheet
        .columns
        .header_index(field)
        .and_then(|idx| sheet.headers.get(idx))
        .map_or("(unmapped)", String::as_str)
}

/// Print which header each logical field resolves to for a sheet.
///
/// # Errors
///
/// Returns an error if the column map or sheet cannot be loaded, or a
/// required field has no matching header.
pub(crate) fn run_columns(input: &Path, columns: Option<&Path>) -> anyhow::Result<()> {
    let map = column_map(columns)?;
    let sheet = input::open_sheet(input, &map)?;

    println!("{:<20}{:<10}HEADER", "FIELD", "REQUIRED");
    for field in LogicalField::ALL {
        let header = resolved_header(&sheet, field);
        let required = if field.is_required() { "yes" } else { "no" };
        println!("{:<20}{:<10}{}", field.as_str(), required, header);
    }
    println!();
    println!("{} data rows", sheet.records.len());
    Ok(())
}
