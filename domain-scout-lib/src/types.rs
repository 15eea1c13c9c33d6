//! Core data types shared across the pipeline.
//!
//! Check results, ranked entries, generation output and the verifier settings.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;

/// Result of a single availability check.
///
/// Exactly one `CheckResult` is produced per input domain. Any outcome other
/// than a registry "not found" response (including repeated transport failures)
/// is reported as `available == false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckResult {
    /// The domain name that was checked (e.g., "example.com")
    pub domain: String,

    /// Whether the registry reported the domain as not registered
    pub available: bool,
}

impl CheckResult {
    pub fn new<D: Into<String>>(domain: D, available: bool) -> Self {
        Self {
            domain: domain.into(),
            available,
        }
    }
}

/// A scored, available domain.
///
/// Entries order by highest score first, then fewer syllables, then the full
/// domain string ascending. Two entries compare equal only when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Full domain, including the TLD when one was given
    pub domain: String,

    /// Quality score (may be negative)
    pub score: i64,

    /// Estimated syllables of the bare name
    pub syllables: u32,

    /// Length of the bare name, excluding the TLD
    pub length: usize,
}

impl Ord for RankedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.syllables.cmp(&other.syllables))
            .then_with(|| self.domain.cmp(&other.domain))
            .then_with(|| self.length.cmp(&other.length))
    }
}

impl PartialOrd for RankedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Output of the candidate generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// Candidate base names, sorted ascending and unique
    pub names: Vec<String>,

    /// How many unique valid candidates existed before the cap was applied
    pub total_generated: usize,

    /// Whether random sampling was used to enforce the cap
    pub sampled: bool,
}

/// Outcome of a verification batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Every input domain has a result
    Completed(Vec<CheckResult>),

    /// An interrupt stopped the batch; `completed` holds the results that finished
    Interrupted {
        completed: Vec<CheckResult>,
        pending: usize,
    },
}

impl VerifyOutcome {
    /// Whether the batch finished normally.
    pub fn is_complete(&self) -> bool {
        matches!(self, VerifyOutcome::Completed(_))
    }

    /// Results that were computed, complete or not.
    pub fn results(&self) -> &[CheckResult] {
        match self {
            VerifyOutcome::Completed(results) => results,
            VerifyOutcome::Interrupted { completed, .. } => completed,
        }
    }

    /// Consume the outcome, keeping whatever results exist.
    pub fn into_results(self) -> Vec<CheckResult> {
        match self {
            VerifyOutcome::Completed(results) => results,
            VerifyOutcome::Interrupted { completed, .. } => completed,
        }
    }
}

/// Configuration options for availability verification.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    /// Number of concurrent workers (W).
    /// Default: 6, Range: 1-100
    pub concurrency: usize,

    /// Minimum interval between dispatches of one rate-limit scope (R).
    /// Default: 100ms
    pub rate_limit: Duration,

    /// Timeout for each individual lookup request (T).
    /// Default: 5 seconds
    pub timeout: Duration,

    /// Additional attempts after a transport failure (K).
    /// Default: 1
    pub retry_count: u32,

    /// Fixed pause between retry attempts.
    /// Default: 500ms
    pub retry_delay: Duration,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: 6,
            rate_limit: Duration::from_millis(100),
            timeout: Duration::from_secs(5),
            retry_count: 1,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl CheckConfig {
    /// Set the worker count, capped at 100 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the minimum interval between dispatches.
    pub fn with_rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many times a transport failure is retried.
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the pause between retries.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Interval each worker's own scope enforces.
    ///
    /// Scaling by the worker count makes the aggregate rate approximate one
    /// dispatch per `rate_limit`. It is not a global limiter: workers are not
    /// phase-aligned, so short bursts above the nominal rate are possible.
    pub fn worker_interval(&self) -> Duration {
        let workers = self.concurrency.max(1) as u32;
        self.rate_limit.saturating_mul(workers)
    }
}
