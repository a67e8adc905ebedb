//! URL handles: slug of artist, title, and year, unique within one batch.

use std::collections::HashSet;

/// Lowercase ASCII slug. Apostrophes vanish, any other non-alphanumeric
/// ASCII becomes a separator, and non-ASCII characters are dropped.
#[must_use]
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii() && *c != '\'')
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Base handle for a release before collision handling.
#[must_use]
pub fn base_handle(artist: &str, title: &str, year: Option<i32>) -> String {
    match year {
        Some(year) => slugify(&format!("{artist} {title} {year}")),
        None => slugify(&format!("{artist} {title}")),
    }
}

/// Handles already emitted in the current batch.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    used: HashSet<String>,
}

impl HandleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a handle derived from `base`. An empty base falls back to
    /// `release-<id>`; a taken handle gets `-2`, `-3`, … appended.
    pub fn claim(&mut self, base: &str, release_id: u64) -> String {
        let base = if base.is_empty() {
            format!("release-{release_id}")
        } else {
            base.to_owned()
        };

        let mut candidate = base.clone();
        let mut suffix = 2_u32;
        while self.used.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}
