//! Concurrency helpers for the availability verifier.
//!
//! Work is split across workers round-robin, and each worker owns a
//! [`RateLimiter`] that spaces out its own dispatches. Limiters are never
//! shared between tasks.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Enforces a minimum interval between consecutive dispatches.
///
/// Uses tokio's clock, so paused-time tests observe exact intervals.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_dispatch: Option<Instant>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_dispatch: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until a dispatch is allowed, then record it.
    ///
    /// The first call returns immediately.
    pub async fn acquire(&mut self) {
        if let Some(last) = self.last_dispatch {
            let ready_at = last + self.interval;
            if Instant::now() < ready_at {
                sleep_until(ready_at).await;
            }
        }
        self.last_dispatch = Some(Instant::now());
    }
}

/// Split items into `workers` partitions, assigning item `i` to partition
/// `i % workers`. Each partition keeps input order. Empty partitions are
/// dropped, so fewer than `workers` may be returned.
pub fn partition<T: Clone>(items: &[T], workers: usize) -> Vec<Vec<T>> {
    let workers = workers.max(1);
    let mut parts: Vec<Vec<T>> = vec![Vec::new(); workers];

    for (i, item) in items.iter().enumerate() {
        parts[i % workers].push(item.clone());
    }

    parts.retain(|p| !p.is_empty());
    parts
}
