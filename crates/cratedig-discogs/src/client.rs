//! HTTP client for the Discogs REST API.
//!
//! Wraps `reqwest` with token auth, the shared [`RateGate`], retry on
//! transient failures, and typed response deserialization.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use cratedig_core::{AppConfig, CandidateRelease};
use reqwest::{Client, StatusCode, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::error::DiscogsError;
use crate::gate::RateGate;
use crate::retry::retry_with_backoff;
use crate::types::{
    suggestions_to_prices, PriceSuggestion, ReleaseResponse, SearchResponse, SearchResult,
};

/// Connection and retry settings for a [`DiscogsClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub token: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl ClientSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            token: config.discogs_token.clone(),
            user_agent: config.user_agent.clone(),
            timeout_secs: config.request_timeout_secs,
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
        }
    }
}

/// Parameters for one `/database/search` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchParams<'a> {
    /// Free text, `"<artist> <title>"`.
    pub query: &'a str,
    pub catno: Option<&'a str>,
    pub country: Option<&'a str>,
    pub label: Option<&'a str>,
    pub per_page: u32,
}

/// Client for the Discogs REST API.
///
/// Every request, retries included, first passes through the shared
/// [`RateGate`].
pub struct DiscogsClient {
    client: Client,
    token: String,
    base_url: Url,
    gate: Arc<RateGate>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl DiscogsClient {
    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`DiscogsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`DiscogsError::InvalidBaseUrl`] if the configured base URL is invalid.
    pub fn new(config: &AppConfig, gate: Arc<RateGate>) -> Result<Self, DiscogsError> {
        Self::with_base_url(
            &ClientSettings::from_config(config),
            &config.discogs_base_url,
            gate,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DiscogsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`DiscogsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        settings: &ClientSettings,
        base_url: &str,
        gate: Arc<RateGate>,
    ) -> Result<Self, DiscogsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        // Exactly one trailing slash so `Url::join` appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DiscogsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: settings.token.clone(),
            base_url,
            gate,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.backoff_base_ms,
        })
    }

    /// The gate this client paces through.
    #[must_use]
    pub fn gate(&self) -> &Arc<RateGate> {
        &self.gate
    }

    /// Searches releases; results keep the API's rank order.
    ///
    /// # Errors
    ///
    /// - [`DiscogsError::RateLimited`] / [`DiscogsError::UnexpectedStatus`] /
    ///   [`DiscogsError::Http`] after retries are exhausted.
    /// - [`DiscogsError::Deserialize`] if the body does not match the expected shape.
    pub async fn search(
        &self,
        params: &SearchParams<'_>,
    ) -> Result<Vec<SearchResult>, DiscogsError> {
        let mut extra = vec![("q", params.query.to_owned()), ("type", "release".to_owned())];
        extra.push(("per_page", params.per_page.to_string()));
        extra.push(("page", "1".to_owned()));
        if let Some(catno) = params.catno {
            extra.push(("catno", catno.to_owned()));
        }
        if let Some(country) = params.country {
            extra.push(("country", country.to_owned()));
        }
        if let Some(label) = params.label {
            extra.push(("label", label.to_owned()));
        }

        let url = self.build_url("database/search", &extra)?;
        tracing::debug!(query = params.query, url = %url, "Discogs search");
        let response: SearchResponse = self
            .get_json(&url, &format!("search(q={})", params.query))
            .await?;
        Ok(response.results)
    }

    /// Fetches full release detail.
    ///
    /// # Errors
    ///
    /// - [`DiscogsError::NotFound`] on 404 (not retried).
    /// - Transient errors after retries are exhausted, or
    ///   [`DiscogsError::Deserialize`] on a malformed body.
    pub async fn release(&self, release_id: u64) -> Result<CandidateRelease, DiscogsError> {
        let url = self.build_url(&format!("releases/{release_id}"), &[])?;
        let response: ReleaseResponse = self
            .get_json(&url, &format!("release(id={release_id})"))
            .await?;
        Ok(response.into())
    }

    /// Fetches condition-keyed price suggestions for a release.
    ///
    /// Keys are Discogs condition names such as `"Very Good Plus (VG+)"`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::release`]. Discogs answers 401/403 when the token's
    /// account has no seller settings; that surfaces as
    /// [`DiscogsError::UnexpectedStatus`].
    pub async fn price_suggestions(
        &self,
        release_id: u64,
    ) -> Result<BTreeMap<String, Decimal>, DiscogsError> {
        let url = self.build_url(&format!("marketplace/price_suggestions/{release_id}"), &[])?;
        let raw: HashMap<String, PriceSuggestion> = self
            .get_json(&url, &format!("price_suggestions(id={release_id})"))
            .await?;
        Ok(suggestions_to_prices(raw))
    }

    /// Joins `path` onto the base URL and appends percent-encoded query pairs.
    fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, DiscogsError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| DiscogsError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a paced, retried GET and parses the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, DiscogsError> {
        retry_with_backoff(&self.gate, self.max_retries, self.backoff_base_ms, move || async move {
            self.gate.wait().await;
            let response = self
                .client
                .get(url.clone())
                .header(
                    reqwest::header::AUTHORIZATION,
                    format!("Discogs token={}", self.token),
                )
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(0);
                return Err(DiscogsError::RateLimited { retry_after_secs });
            }
            if status == StatusCode::NOT_FOUND {
                return Err(DiscogsError::NotFound {
                    url: url.to_string(),
                });
            }
            if !status.is_success() {
                return Err(DiscogsError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| DiscogsError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }
}
