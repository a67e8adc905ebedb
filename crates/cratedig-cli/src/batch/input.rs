//! Inventory sheet loading.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use cratedig_core::{ColumnMap, InventoryRow, ResolvedColumns};

/// One data row: the extracted inventory fields and the raw cells, kept
/// verbatim for the reject file.
#[derive(Debug, Clone)]
pub(crate) struct SheetRecord {
    pub row: InventoryRow,
    pub raw: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct InputSheet {
    pub headers: Vec<String>,
    pub columns: ResolvedColumns,
    pub records: Vec<SheetRecord>,
}

/// Opens a CSV inventory sheet.
///
/// # Errors
///
/// Returns an error if the path is not a `.csv` file, cannot be read, or
/// lacks a column for a required field.
pub(crate) fn open_sheet(path: &Path, map: &ColumnMap) -> anyhow::Result<InputSheet> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        anyhow::bail!(
            "unsupported input file {}; export the sheet as .csv",
            path.display()
        );
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open input sheet {}", path.display()))?;
    read_sheet(file, map).with_context(|| format!("failed to read {}", path.display()))
}

/// Reads a sheet from any CSV source. Headers are resolved once; rows whose
/// cells are all blank are skipped.
///
/// # Errors
///
/// Returns an error on malformed CSV or a missing required column.
pub(crate) fn read_sheet<R: Read>(reader: R, map: &ColumnMap) -> anyhow::Result<InputSheet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_owned())
        .collect();
    let columns = map.resolve(&headers)?;

    let mut records = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let raw: Vec<String> = record.iter().map(str::to_owned).collect();
        if raw.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row = columns.extract(idx + 1, &raw);
        records.push(SheetRecord { row, raw });
    }

    tracing::info!(rows = records.len(), "inventory sheet loaded");

    Ok(InputSheet {
        headers,
        columns,
        records,
    })
}
