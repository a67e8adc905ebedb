//! The catalog seam the matcher queries.

use std::collections::BTreeMap;

use async_trait::async_trait;
use cratedig_core::CandidateRelease;
use cratedig_discogs::{DiscogsClient, DiscogsError, SearchResult};
use rust_decimal::Decimal;

use crate::query::QueryAttempt;

/// External release catalog.
///
/// [`DiscogsClient`] is the production implementation; tests supply an
/// in-memory one.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Ordered (API rank) summaries for one attempt, at most `per_page`.
    async fn search(
        &self,
        attempt: &QueryAttempt,
        per_page: u32,
    ) -> Result<Vec<SearchResult>, DiscogsError>;

    async fn release(&self, release_id: u64) -> Result<CandidateRelease, DiscogsError>;

    async fn price_suggestions(
        &self,
        release_id: u64,
    ) -> Result<BTreeMap<String, Decimal>, DiscogsError>;
}

#[async_trait]
impl Catalog for DiscogsClient {
    async fn search(
        &self,
        attempt: &QueryAttempt,
        per_page: u32,
    ) -> Result<Vec<SearchResult>, DiscogsError> {
        let text = attempt.query_text();
        DiscogsClient::search(self, &attempt.search_params(&text, per_page)).await
    }

    async fn release(&self, release_id: u64) -> Result<CandidateRelease, DiscogsError> {
        DiscogsClient::release(self, release_id).await
    }

    async fn price_suggestions(
        &self,
        release_id: u64,
    ) -> Result<BTreeMap<String, Decimal>, DiscogsError> {
        DiscogsClient::price_suggestions(self, release_id).await
    }
}
