//! Per-item metafield values: shelf artist, condition summary, inventory date.

use chrono::NaiveDate;

const ORCHESTRAL_WORDS: [&str; 4] = ["ORCHESTRA", "PHILHARMONIC", "SYMPHONY", "CONDUCTOR"];

const GROUP_WORDS: [&str; 15] = [
    "&",
    " AND ",
    "BAND",
    "ORCHESTRA",
    "PHILHARMONIC",
    "SYMPHONY",
    "ENSEMBLE",
    "CHOIR",
    "CHORUS",
    "QUARTET",
    "TRIO",
    "DUO",
    "COMPANY",
    "PLAYERS",
    "SINGERS",
];

/// Accepted sheet date layouts. Two-digit years go before four-digit ones so
/// `"3/14/24"` is not read as year 24.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

/// Two to four words and no ensemble keyword.
fn looks_like_person(name: &str) -> bool {
    let upper = name.to_uppercase();
    if GROUP_WORDS.iter().any(|w| upper.contains(w)) {
        return false;
    }
    (2..=4).contains(&name.split_whitespace().count())
}

/// `"Miles Dewey Davis"` → `"Davis, Miles Dewey"`. Names that already carry
/// a comma are left alone.
fn last_name_first(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.contains(',') {
        return trimmed.to_owned();
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{last}, {}", rest.join(" ")),
        _ => trimmed.to_owned(),
    }
}

/// Name the record is shelved under.
///
/// Orchestral releases with a credited composer shelve under the composer;
/// solo performers are flipped to last-name-first; groups stay as given.
#[must_use]
pub fn shop_artist(artist: &str, composers: &[String]) -> String {
    let upper = artist.to_uppercase();
    let composer = composers.iter().map(|c| c.trim()).find(|c| !c.is_empty());
    if let Some(composer) = composer {
        if ORCHESTRAL_WORDS.iter().any(|w| upper.contains(w)) {
            return composer.to_owned();
        }
    }

    if looks_like_person(artist) {
        last_name_first(artist)
    } else {
        artist.trim().to_owned()
    }
}

/// `"Media: VG+; Sleeve: VG"`, skipping blank grades.
#[must_use]
pub fn condition_summary(media: &str, sleeve: &str) -> String {
    [("Media", media.trim()), ("Sleeve", sleeve.trim())]
        .into_iter()
        .filter(|(_, grade)| !grade.is_empty())
        .map(|(part, grade)| format!("{part}: {grade}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Normalizes a sheet date to `YYYY-MM-DD`, falling back to `today` when the
/// cell is blank or unreadable.
#[must_use]
pub fn inventory_date(raw: Option<&str>, today: NaiveDate) -> String {
    let text = raw.map(str::trim).unwrap_or_default();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}
