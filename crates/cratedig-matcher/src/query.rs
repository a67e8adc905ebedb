//! Ordered search attempts for one normalized row.
//!
//! The first attempt carries every filter the row has. Later attempts drop
//! catalog, then country, then label. An attempt identical to an earlier one
//! is skipped, so a row without a catalog number never searches twice with
//! the same parameters.

use cratedig_core::NormalizedQuery;
use cratedig_discogs::SearchParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAttempt {
    pub artist: String,
    pub title: String,
    pub catalog: Option<String>,
    pub country: Option<String>,
    pub label: Option<String>,
}

impl QueryAttempt {
    /// Free-text query: `"<canonical artist> <title>"`.
    #[must_use]
    pub fn query_text(&self) -> String {
        format!("{} {}", self.artist, self.title).trim().to_owned()
    }

    /// Borrowed search parameters for the Discogs client.
    #[must_use]
    pub fn search_params<'a>(&'a self, query: &'a str, per_page: u32) -> SearchParams<'a> {
        SearchParams {
            query,
            catno: self.catalog.as_deref(),
            country: self.country.as_deref(),
            label: self.label.as_deref(),
            per_page,
        }
    }

    /// Human-readable form written to the reject file.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("q={}", self.query_text())];
        if let Some(catalog) = &self.catalog {
            parts.push(format!("catno={catalog}"));
        }
        if let Some(country) = &self.country {
            parts.push(format!("country={country}"));
        }
        if let Some(label) = &self.label {
            parts.push(format!("label={label}"));
        }
        parts.join(" | ")
    }
}

/// Builds the fallback ladder: all filters, then without catalog, then also
/// without country, then also without label.
#[must_use]
pub fn build_attempts(query: &NormalizedQuery) -> Vec<QueryAttempt> {
    let full = QueryAttempt {
        artist: query.canonical_artist.clone(),
        title: query.title.clone(),
        catalog: query.catalog.clone(),
        country: query.country.clone(),
        label: query.label.clone(),
    };
    let no_catalog = QueryAttempt {
        catalog: None,
        ..full.clone()
    };
    let no_country = QueryAttempt {
        country: None,
        ..no_catalog.clone()
    };
    let bare = QueryAttempt {
        label: None,
        ..no_country.clone()
    };

    let mut attempts: Vec<QueryAttempt> = Vec::with_capacity(4);
    for attempt in [full, no_catalog, no_country, bare] {
        if !attempts.contains(&attempt) {
            attempts.push(attempt);
        }
    }
    attempts
}
