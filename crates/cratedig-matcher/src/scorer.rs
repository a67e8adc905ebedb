//! Candidate scoring.
//!
//! Score = title similarity (0..=60) plus flat bonuses for country, format,
//! and label agreement, and a larger bonus when the OCR catalog hint appears
//! inside one of the candidate's catalog numbers.

use std::collections::BTreeSet;

use cratedig_core::{CandidateRelease, NormalizedQuery};

pub const TITLE_EXACT: u32 = 60;
pub const TITLE_CONTAINS: u32 = 45;
pub const TITLE_OVERLAP_MAX: u32 = 40;
pub const COUNTRY_BONUS: u32 = 10;
pub const FORMAT_BONUS: u32 = 10;
pub const LABEL_BONUS: u32 = 10;
pub const CATALOG_HINT_BONUS: u32 = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub title: u32,
    pub country: u32,
    pub format: u32,
    pub label: u32,
    pub catalog_hint: u32,
}

impl ScoreBreakdown {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.title + self.country + self.format + self.label + self.catalog_hint
    }
}

/// Lowercases, turns punctuation into spaces, and collapses whitespace.
fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Alphanumerics only, uppercased: `"pcs-7088"` → `"PCS7088"`.
fn compact_catalog(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn title_score(wanted: &str, candidate: &str) -> u32 {
    let wanted = normalize_text(wanted);
    let candidate = normalize_text(candidate);
    if wanted.is_empty() || candidate.is_empty() {
        return 0;
    }
    if wanted == candidate {
        return TITLE_EXACT;
    }
    if candidate.contains(&wanted) || wanted.contains(&candidate) {
        return TITLE_CONTAINS;
    }

    let a: BTreeSet<&str> = wanted.split(' ').collect();
    let b: BTreeSet<&str> = candidate.split(' ').collect();
    let shared = a.intersection(&b).count();
    let union = a.union(&b).count();
    if union == 0 {
        return 0;
    }
    u32::try_from(shared * TITLE_OVERLAP_MAX as usize / union).unwrap_or(TITLE_OVERLAP_MAX)
}

fn format_matches(hint: &str, candidate: &CandidateRelease) -> bool {
    let wanted: BTreeSet<String> = normalize_text(hint)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();
    if wanted.is_empty() {
        return false;
    }
    candidate
        .formats
        .iter()
        .flat_map(|f| std::iter::once(&f.name).chain(f.descriptions.iter()))
        .flat_map(|text| {
            normalize_text(text)
                .split(' ')
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .any(|token| wanted.contains(&token))
}

fn label_matches(hint: &str, candidate: &CandidateRelease) -> bool {
    let wanted = normalize_text(hint);
    !wanted.is_empty()
        && candidate.labels.iter().any(|label| {
            let have = normalize_text(label);
            !have.is_empty() && (have == wanted || have.contains(&wanted) || wanted.contains(&have))
        })
}

fn catalog_hint_matches(hint: &str, candidate: &CandidateRelease) -> bool {
    let wanted = compact_catalog(hint);
    !wanted.is_empty()
        && candidate
            .catalog_numbers
            .iter()
            .any(|catno| compact_catalog(catno).contains(&wanted))
}

/// Scores one fully fetched candidate against the row's query.
#[must_use]
pub fn score_candidate(query: &NormalizedQuery, candidate: &CandidateRelease) -> ScoreBreakdown {
    let mut score = ScoreBreakdown {
        title: title_score(&query.title, &candidate.title),
        ..ScoreBreakdown::default()
    };

    if let (Some(wanted), Some(have)) = (&query.country, &candidate.country) {
        if wanted.trim().eq_ignore_ascii_case(have.trim()) {
            score.country = COUNTRY_BONUS;
        }
    }
    if query
        .format_hint
        .as_deref()
        .is_some_and(|hint| format_matches(hint, candidate))
    {
        score.format = FORMAT_BONUS;
    }
    if query
        .label
        .as_deref()
        .is_some_and(|hint| label_matches(hint, candidate))
    {
        score.label = LABEL_BONUS;
    }
    if query
        .catalog_hint
        .as_deref()
        .is_some_and(|hint| catalog_hint_matches(hint, candidate))
    {
        score.catalog_hint = CATALOG_HINT_BONUS;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratedig_core::ReleaseFormat;

    fn candidate(title: &str) -> CandidateRelease {
        CandidateRelease {
            release_id: 1,
            title: title.to_owned(),
            labels: vec!["Apple Records".to_owned()],
            catalog_numbers: vec!["PCS 7088".to_owned()],
            country: Some("UK".to_owned()),
            formats: vec![ReleaseFormat {
                name: "Vinyl".to_owned(),
                quantity: Some(1),
                descriptions: vec!["LP".to_owned(), "Album".to_owned(), "Stereo".to_owned()],
            }],
            ..CandidateRelease::default()
        }
    }

    fn query(title: &str) -> NormalizedQuery {
        NormalizedQuery {
            canonical_artist: "Beatles, The".to_owned(),
            title: title.to_owned(),
            ..NormalizedQuery::default()
        }
    }

    #[test]
    fn exact_title_ignores_case_and_punctuation() {
        let score = score_candidate(&query("abbey road!"), &candidate("Abbey Road"));
        assert_eq!(score.title, TITLE_EXACT);
        assert_eq!(score.total(), TITLE_EXACT);
    }

    #[test]
    fn contained_title_scores_below_exact() {
        let score = score_candidate(&query("Abbey Road"), &candidate("Abbey Road (Remastered)"));
        assert_eq!(score.title, TITLE_CONTAINS);
    }

    #[test]
    fn token_overlap_is_partial() {
        let score = score_candidate(
            &query("Magical Mystery Tour"),
            &candidate("Mystery Tour Live"),
        );
        // shared {mystery, tour} over union {magical, mystery, tour, live}
        assert_eq!(score.title, 20);
        let none = score_candidate(&query("Revolver"), &candidate("Help"));
        assert_eq!(none.title, 0);
    }

    #[test]
    fn bonuses_add_up() {
        let q = NormalizedQuery {
            country: Some("uk".to_owned()),
            format_hint: Some("LP".to_owned()),
            label: Some("Apple".to_owned()),
            catalog_hint: Some("pcs-7088".to_owned()),
            ..query("Abbey Road")
        };
        let score = score_candidate(&q, &candidate("Abbey Road"));
        assert_eq!(score.country, COUNTRY_BONUS);
        assert_eq!(score.format, FORMAT_BONUS);
        assert_eq!(score.label, LABEL_BONUS);
        assert_eq!(score.catalog_hint, CATALOG_HINT_BONUS);
        assert_eq!(score.total(), 60 + 10 + 10 + 10 + 25);
    }

    #[test]
    fn mismatched_hints_add_nothing() {
        let q = NormalizedQuery {
            country: Some("US".to_owned()),
            format_hint: Some("45".to_owned()),
            label: Some("Capitol".to_owned()),
            catalog_hint: Some("SO-383".to_owned()),
            ..query("Abbey Road")
        };
        let score = score_candidate(&q, &candidate("Abbey Road"));
        assert_eq!(score.total(), TITLE_EXACT);
    }
}
