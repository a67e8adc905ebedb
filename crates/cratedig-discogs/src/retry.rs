//! Retry with exponential back-off and jitter for the Discogs client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Everything else is returned
//! on the first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::DiscogsError;
use crate::gate::RateGate;

const MAX_DELAY_MS: u64 = 10_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** [`DiscogsError::RateLimited`], 5xx
/// [`DiscogsError::UnexpectedStatus`], and network-level
/// [`DiscogsError::Http`] failures.
///
/// **Not retriable:** [`DiscogsError::NotFound`] (a 404 on detail fetch drops
/// the candidate), 4xx statuses, malformed bodies, and a bad base URL.
pub(crate) fn is_retriable(err: &DiscogsError) -> bool {
    match err {
        DiscogsError::RateLimited { .. } => true,
        DiscogsError::UnexpectedStatus { status, .. } => *status >= 500,
        DiscogsError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.is_request()
                || e.status().is_some_and(|s| s.is_server_error())
        }
        DiscogsError::NotFound { .. }
        | DiscogsError::Deserialize { .. }
        | DiscogsError::InvalidBaseUrl { .. } => false,
    }
}

/// Back-off before retry number `attempt` (1-based), before jitter.
///
/// A 429 with a `Retry-After` hint waits at least that long, still bounded
/// by the cap.
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32, err: &DiscogsError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(20));
    let capped = computed.min(MAX_DELAY_MS);
    match err {
        DiscogsError::RateLimited { retry_after_secs } => {
            capped.max(retry_after_secs.saturating_mul(1_000).min(MAX_DELAY_MS))
        }
        _ => capped,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Retry | Sleep before it             |
/// |-------|-----------------------------|
/// | 1     | 1 000 ms × 2⁰ ± 25 % jitter |
/// | 2     | 1 000 ms × 2¹ ± 25 % jitter |
/// | 3     | 1 000 ms × 2² ± 25 % jitter |
///
/// Delay is capped at 10 s. Every retry is counted on `gate`.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    gate: &RateGate,
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, DiscogsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DiscogsError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let base = backoff_delay_ms(backoff_base_ms, attempt, &err);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (base as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "Discogs transient error, retrying after back-off"
                );
                gate.record_retry();
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
