//! Process-wide pacing for outbound Discogs calls.
//!
//! A single [`RateGate`] is created per batch and shared (via `Arc`) by every
//! call site. It enforces a fixed minimum gap between request starts and
//! counts the calls and retries spent, for the run summary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

#[derive(Debug)]
pub struct RateGate {
    min_gap: Duration,
    last_request: Mutex<Option<Instant>>,
    calls: AtomicU64,
    retries: AtomicU64,
}

impl RateGate {
    #[must_use]
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_request: Mutex::new(None),
            calls: AtomicU64::new(0),
            retries: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn from_millis(min_gap_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_gap_ms))
    }

    /// Waits until at least `min_gap` has passed since the previous request
    /// started, then claims the slot.
    ///
    /// The lock is held across the sleep so concurrent callers queue up
    /// instead of bursting together.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_gap {
                tokio::time::sleep(self.min_gap.saturating_sub(elapsed)).await;
            }
        }
        *last = Some(Instant::now());
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Requests sent through this gate, retries included.
    #[must_use]
    pub fn api_calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn retries(&self) -> u64 {
        self.retries.load(Ordering::Relaxed)
    }
}
