//! Catalog release model shared by the client, matcher, and listing crates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// One format entry of a release, e.g. `Vinyl ×2 [LP, Album, Stereo]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseFormat {
    pub name: String,
    /// Disc count; `None` when the catalog omits or garbles it.
    pub quantity: Option<u32>,
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub position: String,
    pub title: String,
    pub duration: String,
}

/// A fully fetched catalog release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRelease {
    pub release_id: u64,
    pub artist: String,
    /// Credited composers, in catalog order.
    pub composers: Vec<String>,
    pub title: String,
    /// Label names in catalog order; the first is the primary label.
    pub labels: Vec<String>,
    /// Catalog numbers in catalog order, one per label entry.
    pub catalog_numbers: Vec<String>,
    pub year: Option<i32>,
    pub country: Option<String>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub formats: Vec<ReleaseFormat>,
    /// Image URLs; the first is the cover.
    pub images: Vec<String>,
    pub tracklist: Vec<Track>,
    pub barcodes: Vec<String>,
    /// Suggested prices keyed by the catalog's condition label
    /// (e.g. `"Very Good Plus (VG+)"`). Empty until fetched for a winner.
    pub suggested_prices: BTreeMap<String, Decimal>,
}

impl CandidateRelease {
    #[must_use]
    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str).filter(|l| !l.is_empty())
    }

    #[must_use]
    pub fn primary_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str).filter(|g| !g.is_empty())
    }

    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str).filter(|i| !i.is_empty())
    }

    /// Public web page for the release.
    #[must_use]
    pub fn web_url(&self) -> String {
        format!("https://www.discogs.com/release/{}", self.release_id)
    }
}
