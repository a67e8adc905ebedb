//! Wire types for the Discogs REST API and their conversion into
//! [`CandidateRelease`].

use std::collections::{BTreeMap, HashMap};

use cratedig_core::{CandidateRelease, ReleaseFormat, Track};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Thin summary returned by `/database/search`; detail needs a second fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    /// `"Artist - Title"` as rendered by the search index.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub catno: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseResponse {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// Release-level credits (`"Composed By"`, `"Producer"`, ...).
    #[serde(default)]
    pub extraartists: Vec<CreditRef>,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub formats: Vec<FormatRef>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub tracklist: Vec<TrackRef>,
    #[serde(default)]
    pub identifiers: Vec<IdentifierRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreditRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub catno: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FormatRef {
    #[serde(default)]
    pub name: String,
    /// Discogs sends the disc count as a string (`"2"`).
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageRef {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackRef {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdentifierRef {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

/// One entry of `/marketplace/price_suggestions/{id}`, keyed by condition.
#[derive(Debug, Deserialize)]
pub(crate) struct PriceSuggestion {
    #[serde(default)]
    pub value: Option<f64>,
}

/// Strips the Discogs disambiguation suffix: `"Nirvana (2)"` → `"Nirvana"`.
fn strip_disambiguation(name: &str) -> &str {
    let trimmed = name.trim();
    if let Some(open) = trimmed.rfind(" (") {
        let inner = &trimmed[open + 2..];
        if let Some(digits) = inner.strip_suffix(')') {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return &trimmed[..open];
            }
        }
    }
    trimmed
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl From<ReleaseResponse> for CandidateRelease {
    fn from(release: ReleaseResponse) -> Self {
        let artist = release
            .artists
            .iter()
            .map(|a| strip_disambiguation(&a.name))
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let composers = release
            .extraartists
            .iter()
            .filter(|credit| credit.role.to_lowercase().contains("composed"))
            .map(|credit| strip_disambiguation(&credit.name).to_owned())
            .filter(|name| !name.is_empty())
            .collect();

        let labels = release
            .labels
            .iter()
            .map(|l| strip_disambiguation(&l.name).to_owned())
            .collect();
        let catalog_numbers = release
            .labels
            .iter()
            .filter_map(|l| l.catno.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect();

        let formats = release
            .formats
            .into_iter()
            .map(|f| ReleaseFormat {
                name: f.name,
                quantity: f.qty.as_deref().and_then(|q| q.trim().parse().ok()),
                descriptions: f.descriptions,
            })
            .collect();

        // The primary image leads; the rest keep API order.
        let (primary, secondary): (Vec<_>, Vec<_>) = release
            .images
            .into_iter()
            .partition(|img| img.kind.as_deref() == Some("primary"));
        let images = primary
            .into_iter()
            .chain(secondary)
            .filter_map(|img| non_blank(img.uri))
            .collect();

        let tracklist = release
            .tracklist
            .into_iter()
            .filter(|t| !t.title.trim().is_empty())
            .map(|t| Track {
                position: t.position.trim().to_owned(),
                title: t.title.trim().to_owned(),
                duration: t.duration.trim().to_owned(),
            })
            .collect();

        let barcodes = release
            .identifiers
            .into_iter()
            .filter(|i| i.kind.trim().eq_ignore_ascii_case("barcode"))
            .filter_map(|i| non_blank(Some(i.value)))
            .collect();

        Self {
            release_id: release.id,
            artist,
            composers,
            title: release.title.trim().to_owned(),
            labels,
            catalog_numbers,
            year: release.year.filter(|y| *y > 0),
            country: non_blank(release.country),
            genres: release.genres,
            styles: release.styles,
            formats,
            images,
            tracklist,
            barcodes,
            suggested_prices: BTreeMap::new(),
        }
    }
}

/// Converts the suggestion payload to decimal prices, skipping entries
/// without a usable value.
pub(crate) fn suggestions_to_prices(
    raw: HashMap<String, PriceSuggestion>,
) -> BTreeMap<String, Decimal> {
    raw.into_iter()
        .filter_map(|(condition, suggestion)| {
            let value = suggestion.value.filter(|v| v.is_finite() && *v > 0.0)?;
            let price = Decimal::try_from(value).ok()?.round_dp(2);
            Some((condition, price))
        })
        .collect()
}
