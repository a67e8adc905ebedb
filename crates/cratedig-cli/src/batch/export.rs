//! Product and reject CSV writers.
//!
//! Both writers emit their header on creation and flush after every row,
//! so an interrupted batch leaves valid files up to the last finished row.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use cratedig_listing::{OutputRow, OUTPUT_COLUMNS};

pub(crate) const REASON_COLUMN: &str = "Unmatched_Reason";
pub(crate) const QUERY_COLUMN: &str = "Discogs_Query";
pub(crate) const DETAIL_COLUMN: &str = "Unmatched_Detail";

/// `<dir>/<stem>_unmatched.csv` next to the product file.
pub(crate) fn reject_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("products");
    output.with_file_name(format!("{stem}_unmatched.csv"))
}

fn create_file(path: &Path) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

#[cfg(test)]
fn into_inner<W: Write>(writer: csv::Writer<W>) -> anyhow::Result<W> {
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush csv output: {}", e.error()))
}

pub(crate) struct ProductWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ProductWriter<File> {
    pub(crate) fn create(path: &Path) -> anyhow::Result<Self> {
        Self::new(create_file(path)?)
    }
}

impl<W: Write> ProductWriter<W> {
    pub(crate) fn new(inner: W) -> anyhow::Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(OUTPUT_COLUMNS)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Writes all rows of one item, then flushes.
    pub(crate) fn write(&mut self, rows: &[OutputRow]) -> anyhow::Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> anyhow::Result<W> {
        into_inner(self.writer)
    }
}

/// Rejected rows: the original cells plus reason, attempted queries, and detail.
pub(crate) struct RejectWriter<W: Write> {
    writer: csv::Writer<W>,
    width: usize,
}

impl RejectWriter<File> {
    pub(crate) fn create(path: &Path, input_headers: &[String]) -> anyhow::Result<Self> {
        Self::new(create_file(path)?, input_headers)
    }
}

impl<W: Write> RejectWriter<W> {
    pub(crate) fn new(inner: W, input_headers: &[String]) -> anyhow::Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        let header = input_headers
            .iter()
            .map(String::as_str)
            .chain([REASON_COLUMN, QUERY_COLUMN, DETAIL_COLUMN]);
        writer.write_record(header)?;
        writer.flush()?;
        Ok(Self {
            writer,
            width: input_headers.len(),
        })
    }

    /// Writes one rejected row. Short rows are padded so the trailing
    /// columns line up with the header.
    pub(crate) fn write(
        &mut self,
        raw: &[String],
        reason: &str,
        queries: &[String],
        detail: &str,
    ) -> anyhow::Result<()> {
        let joined = queries.join(" || ");
        let cells = raw
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat(""))
            .take(self.width)
            .chain([reason, joined.as_str(), detail]);
        self.writer.write_record(cells)?;
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> anyhow::Result<W> {
        into_inner(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_path_sits_beside_output() {
        assert_eq!(
            reject_path(Path::new("out/shopify.csv")),
            PathBuf::from("out/shopify_unmatched.csv")
        );
    }

    #[test]
    fn product_header_is_written_on_creation() {
        let writer = ProductWriter::new(Vec::new()).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(text.starts_with("Title,URL handle,Description,"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn reject_rows_keep_original_cells_and_pad() {
        let headers = vec!["Artist".to_owned(), "Title".to_owned(), "Country".to_owned()];
        let mut writer = RejectWriter::new(Vec::new(), &headers).unwrap();
        writer
            .write(
                &["Nobody".to_owned(), "Nothing".to_owned()],
                "NO_RESULTS",
                &["q=Nobody Nothing".to_owned(), "q=Nobody Nothing | country=US".to_owned()],
                "no search results",
            )
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Artist,Title,Country,Unmatched_Reason,Discogs_Query,Unmatched_Detail"
        );
        assert_eq!(
            lines[1],
            "Nobody,Nothing,,NO_RESULTS,q=Nobody Nothing || q=Nobody Nothing | country=US,no search results"
        );
    }
}
