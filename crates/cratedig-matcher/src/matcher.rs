//! Candidate selection across the fallback ladder.
//!
//! For each attempt in order: search, detail-fetch up to
//! `candidates_per_query` results, score them, and stop at the first
//! attempt whose best candidate clears `min_score`. Candidates whose detail
//! fetch fails are dropped individually; a release fetched (or failed) once
//! is not fetched again for the same row.

use std::collections::HashMap;
use std::fmt;

use cratedig_core::{CandidateRelease, NormalizedQuery};

use crate::cancel::{CancelFlag, Cancelled};
use crate::catalog::Catalog;
use crate::query::build_attempts;
use crate::scorer::score_candidate;

/// Why a row produced no winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    /// No attempt returned any search result (failed searches included).
    NoResults,
    /// Candidates were scored but none reached the threshold.
    BelowThreshold,
    /// Every candidate of every attempt failed its detail fetch.
    DetailFetchFailed,
}

impl NoMatchReason {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NoResults => "NO_RESULTS",
            Self::BelowThreshold => "BELOW_THRESHOLD",
            Self::DetailFetchFailed => "DETAIL_FETCH_FAILED",
        }
    }
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Matched {
        release: Box<CandidateRelease>,
        score: u32,
        /// Described attempts up to and including the winning one.
        attempted: Vec<String>,
    },
    NoMatch {
        reason: NoMatchReason,
        detail: String,
        attempted: Vec<String>,
    },
}

/// Matches normalized rows against a [`Catalog`].
pub struct Matcher<C> {
    catalog: C,
    candidates_per_query: u32,
    min_score: u32,
}

impl<C: Catalog> Matcher<C> {
    pub fn new(catalog: C, candidates_per_query: u32, min_score: u32) -> Self {
        Self {
            catalog,
            candidates_per_query,
            min_score,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Runs the fallback ladder for one row.
    ///
    /// Highest score wins; among equal scores the earlier API rank wins.
    /// The winner's price suggestions are fetched last; a failure there is
    /// logged and leaves the suggestions empty.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancel` is set before any outbound call.
    pub async fn match_row(
        &self,
        query: &NormalizedQuery,
        cancel: &CancelFlag,
    ) -> Result<MatchResult, Cancelled> {
        let per_page = self.candidates_per_query;
        let mut attempted = Vec::new();
        let mut details: HashMap<u64, Option<CandidateRelease>> = HashMap::new();
        let mut saw_results = false;
        let mut saw_detail = false;
        let mut best_overall: Option<u32> = None;
        let mut last_search_error: Option<String> = None;

        for attempt in build_attempts(query) {
            cancel.check()?;
            attempted.push(attempt.describe());

            let results = match self.catalog.search(&attempt, per_page).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!(query = %attempt.describe(), error = %e, "search failed");
                    last_search_error = Some(e.to_string());
                    continue;
                }
            };
            if results.is_empty() {
                tracing::debug!(query = %attempt.describe(), "no search results");
                continue;
            }
            saw_results = true;

            let mut best: Option<(u32, CandidateRelease)> = None;
            for summary in results.iter().take(per_page as usize) {
                if !details.contains_key(&summary.id) {
                    cancel.check()?;
                    let fetched = match self.catalog.release(summary.id).await {
                        Ok(release) => Some(release),
                        Err(e) => {
                            tracing::warn!(
                                release_id = summary.id,
                                error = %e,
                                "detail fetch failed, dropping candidate"
                            );
                            None
                        }
                    };
                    details.insert(summary.id, fetched);
                }
                let Some(Some(release)) = details.get(&summary.id) else {
                    continue;
                };
                saw_detail = true;

                let score = score_candidate(query, release);
                tracing::debug!(
                    release_id = summary.id,
                    title = score.title,
                    country = score.country,
                    format = score.format,
                    label = score.label,
                    catalog_hint = score.catalog_hint,
                    total = score.total(),
                    "scored candidate"
                );
                // Strictly greater keeps the earlier rank on ties.
                if best.as_ref().is_none_or(|(top, _)| score.total() > *top) {
                    best = Some((score.total(), release.clone()));
                }
            }

            let Some((score, mut release)) = best else {
                continue;
            };
            best_overall = Some(best_overall.map_or(score, |b| b.max(score)));
            if score < self.min_score {
                tracing::debug!(
                    query = %attempt.describe(),
                    score,
                    min_score = self.min_score,
                    "best candidate below threshold"
                );
                continue;
            }

            cancel.check()?;
            match self.catalog.price_suggestions(release.release_id).await {
                Ok(prices) => release.suggested_prices = prices,
                Err(e) => tracing::warn!(
                    release_id = release.release_id,
                    error = %e,
                    "price suggestions unavailable"
                ),
            }
            return Ok(MatchResult::Matched {
                release: Box::new(release),
                score,
                attempted,
            });
        }

        let (reason, detail) = if !saw_results {
            let detail = last_search_error.map_or_else(
                || "no search results for any query".to_owned(),
                |e| format!("no search results; last search error: {e}"),
            );
            (NoMatchReason::NoResults, detail)
        } else if !saw_detail {
            (
                NoMatchReason::DetailFetchFailed,
                "every candidate failed its detail fetch".to_owned(),
            )
        } else {
            (
                NoMatchReason::BelowThreshold,
                format!(
                    "best score {} below threshold {}",
                    best_overall.unwrap_or(0),
                    self.min_score
                ),
            )
        };
        Ok(MatchResult::NoMatch {
            reason,
            detail,
            attempted,
        })
    }
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
