//! Concurrent, rate-limited availability verification.
//!
//! [`AvailabilityVerifier`] turns an ordered list of domains into exactly one
//! [`CheckResult`] per domain. Domains are dealt round-robin to `concurrency`
//! tokio tasks; each task owns its own [`RateLimiter`] and processes its share
//! in order. Transport failures are retried with a fixed delay, outside the
//! rate limiter. Anything other than a registry "not found" is unavailable.

use crate::concurrent::{partition, RateLimiter};
use crate::error::DomainScoutError;
#[cfg(feature = "rdap")]
use crate::protocols::RdapClient;
use crate::protocols::RegistryLookup;
use crate::types::{CheckConfig, CheckResult, VerifyOutcome};
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Verifies availability for batches of domains.
///
/// # Example
///
/// ```rust,no_run
/// use domain_scout_lib::{AvailabilityVerifier, CheckConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let verifier = AvailabilityVerifier::rdap(CheckConfig::default())?;
///     let results = verifier
///         .check_domains(&["synclink.com".to_string()])
///         .await?;
///     println!("{:?}", results);
///     Ok(())
/// }
/// ```
pub struct AvailabilityVerifier<L> {
    lookup: Arc<L>,
    config: CheckConfig,
}

#[cfg(feature = "rdap")]
impl AvailabilityVerifier<RdapClient> {
    /// A verifier backed by an RDAP client using the configured timeout.
    pub fn rdap(config: CheckConfig) -> Result<Self, DomainScoutError> {
        let client = RdapClient::with_timeout(config.timeout)?;
        Ok(Self::new(client, config))
    }
}

impl<L: RegistryLookup + 'static> AvailabilityVerifier<L> {
    pub fn new(lookup: L, config: CheckConfig) -> Self {
        Self::with_shared(Arc::new(lookup), config)
    }

    pub fn with_shared(lookup: Arc<L>, config: CheckConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check one domain with retries. Not rate limited.
    pub async fn check_domain(&self, domain: &str) -> CheckResult {
        verify_one(self.lookup.as_ref(), &self.config, domain).await
    }

    /// Check every domain; one result per input, grouped by worker.
    pub async fn check_domains(
        &self,
        domains: &[String],
    ) -> Result<Vec<CheckResult>, DomainScoutError> {
        let (_keep_open, abort) = watch::channel(false);
        let outcome = self.check_domains_with_abort(domains, abort).await?;
        Ok(outcome.into_results())
    }

    /// Check every domain, stopping early once `abort` turns `true`.
    ///
    /// After an abort no new lookups start and in-flight lookups are
    /// abandoned. Finished results come back in [`VerifyOutcome::Interrupted`]
    /// together with the number of domains left unchecked.
    pub async fn check_domains_with_abort(
        &self,
        domains: &[String],
        abort: watch::Receiver<bool>,
    ) -> Result<VerifyOutcome, DomainScoutError> {
        let parts = partition(domains, self.config.concurrency);
        let interval = if parts.len() > 1 {
            self.config.worker_interval()
        } else {
            self.config.rate_limit
        };

        info!(
            domains = domains.len(),
            workers = parts.len(),
            interval_ms = interval.as_millis() as u64,
            "starting availability checks"
        );

        let handles = parts.into_iter().enumerate().map(|(id, share)| {
            let lookup = Arc::clone(&self.lookup);
            let config = self.config.clone();
            let abort = abort.clone();
            tokio::spawn(async move {
                run_worker(id, lookup, config, share, RateLimiter::new(interval), abort).await
            })
        });

        let reports = try_join_all(handles)
            .await
            .map_err(|e| DomainScoutError::internal(format!("Verifier worker failed: {}", e)))?;

        let pending: usize = reports.iter().map(|r| r.pending).sum();
        let results: Vec<CheckResult> = reports.into_iter().flat_map(|r| r.results).collect();
        let available = results.iter().filter(|r| r.available).count();

        if pending > 0 {
            warn!(
                completed = results.len(),
                pending, "availability checks interrupted"
            );
            return Ok(VerifyOutcome::Interrupted {
                completed: results,
                pending,
            });
        }

        info!(
            checked = results.len(),
            available, "availability checks finished"
        );
        Ok(VerifyOutcome::Completed(results))
    }
}

struct WorkerReport {
    results: Vec<CheckResult>,
    pending: usize,
}

async fn run_worker<L: RegistryLookup>(
    id: usize,
    lookup: Arc<L>,
    config: CheckConfig,
    share: Vec<String>,
    mut limiter: RateLimiter,
    mut abort: watch::Receiver<bool>,
) -> WorkerReport {
    let total = share.len();
    let mut results = Vec::with_capacity(total);

    for domain in &share {
        let stop = *abort.borrow();
        if stop {
            break;
        }

        let checked = async {
            limiter.acquire().await;
            debug!(worker = id, domain = %domain, "dispatch");
            verify_one(lookup.as_ref(), &config, domain).await
        };

        tokio::select! {
            result = checked => results.push(result),
            _ = abort_requested(&mut abort) => break,
        }
    }

    WorkerReport {
        pending: total - results.len(),
        results,
    }
}

/// Resolves once the abort flag is set. Never resolves if the sender is gone.
async fn abort_requested(abort: &mut watch::Receiver<bool>) {
    loop {
        let stop = *abort.borrow_and_update();
        if stop {
            return;
        }
        if abort.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// At most `retry_count + 1` attempts; only retryable errors are retried.
async fn verify_one<L: RegistryLookup + ?Sized>(
    lookup: &L,
    config: &CheckConfig,
    domain: &str,
) -> CheckResult {
    let attempts = config.retry_count.saturating_add(1);

    for attempt in 1..=attempts {
        match lookup.lookup(domain).await {
            Ok(status) => {
                debug!(domain, ?status, "lookup answered");
                return CheckResult::new(domain, status.is_available());
            }
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!(domain, attempt, error = %e, "lookup failed, retrying");
                tokio::time::sleep(config.retry_delay).await;
            }
            Err(e) => {
                debug!(domain, attempt, error = %e, "no answer, marking unavailable");
                break;
            }
        }
    }

    CheckResult::new(domain, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocols::LookupStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Scripted lookup that records every call.
    struct FakeLookup {
        respond: fn(&str) -> Result<LookupStatus, DomainScoutError>,
        delay: Duration,
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl FakeLookup {
        fn new(respond: fn(&str) -> Result<LookupStatus, DomainScoutError>) -> Self {
            Self {
                respond,
                delay: Duration::ZERO,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn attempts(&self) -> HashMap<String, usize> {
            let mut counts = HashMap::new();
            for (domain, _) in self.calls.lock().unwrap().iter() {
                *counts.entry(domain.clone()).or_insert(0) += 1;
            }
            counts
        }
    }

    #[async_trait]
    impl RegistryLookup for FakeLookup {
        async fn lookup(&self, domain: &str) -> Result<LookupStatus, DomainScoutError> {
            self.calls
                .lock()
                .unwrap()
                .push((domain.to_string(), Instant::now()));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.respond)(domain)
        }
    }

    fn domains(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("name{}.com", i)).collect()
    }

    fn fast_config() -> CheckConfig {
        CheckConfig::default()
            .with_rate_limit(Duration::from_millis(10))
            .with_retry_delay(Duration::from_millis(50))
    }

    fn sorted(mut results: Vec<CheckResult>) -> Vec<CheckResult> {
        results.sort_by(|a, b| a.domain.cmp(&b.domain));
        results
    }

    // ── Verdicts ────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_all_not_found_is_all_available() {
        let verifier = AvailabilityVerifier::new(
            FakeLookup::new(|_| Ok(LookupStatus::NotFound)),
            fast_config(),
        );
        let input = domains(20);
        let results = verifier.check_domains(&input).await.unwrap();

        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|r| r.available));

        let mut seen: Vec<_> = results.iter().map(|r| r.domain.clone()).collect();
        seen.sort();
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_retries_then_unavailable() {
        let lookup = Arc::new(FakeLookup::new(|_| {
            Err(DomainScoutError::network("connection reset"))
        }));
        let config = fast_config().with_retry_count(2);
        let verifier = AvailabilityVerifier::with_shared(Arc::clone(&lookup), config);

        let results = verifier.check_domains(&domains(7)).await.unwrap();
        assert_eq!(results.len(), 7);
        assert!(results.iter().all(|r| !r.available));

        let attempts = lookup.attempts();
        assert_eq!(attempts.len(), 7);
        assert!(attempts.values().all(|&n| n == 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_definitive_response_is_not_retried() {
        let lookup = Arc::new(FakeLookup::new(|_| Ok(LookupStatus::Registered(200))));
        let verifier = AvailabilityVerifier::with_shared(Arc::clone(&lookup), fast_config());

        let results = verifier.check_domains(&domains(4)).await.unwrap();
        assert!(results.iter().all(|r| !r.available));
        assert!(lookup.attempts().values().all(|&n| n == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_is_not_retried() {
        let lookup = Arc::new(FakeLookup::new(|d| {
            Err(DomainScoutError::invalid_domain(d, "no label"))
        }));
        let verifier = AvailabilityVerifier::with_shared(Arc::clone(&lookup), fast_config());

        let result = verifier.check_domain("bad").await;
        assert_eq!(result, CheckResult::new("bad", false));
        assert_eq!(lookup.attempts()["bad"], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_then_success() {
        struct Flaky(Mutex<u32>);

        #[async_trait]
        impl RegistryLookup for Flaky {
            async fn lookup(&self, _: &str) -> Result<LookupStatus, DomainScoutError> {
                let mut calls = self.0.lock().unwrap();
                *calls += 1;
                if *calls == 1 {
                    Err(DomainScoutError::timeout("RDAP request", Duration::from_secs(5)))
                } else {
                    Ok(LookupStatus::NotFound)
                }
            }
        }

        let verifier = AvailabilityVerifier::new(Flaky(Mutex::new(0)), fast_config());
        assert!(verifier.check_domain("synclink.com").await.available);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_answers() {
        let verifier = AvailabilityVerifier::new(
            FakeLookup::new(|d| {
                if d.starts_with("free") {
                    Ok(LookupStatus::NotFound)
                } else {
                    Ok(LookupStatus::Registered(200))
                }
            }),
            fast_config().with_concurrency(3),
        );
        let input: Vec<String> = ["free1.com", "taken.com", "free2.io"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let results = sorted(verifier.check_domains(&input).await.unwrap());
        assert_eq!(
            results,
            vec![
                CheckResult::new("free1.com", true),
                CheckResult::new("free2.io", true),
                CheckResult::new("taken.com", false),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_input() {
        let verifier = AvailabilityVerifier::new(
            FakeLookup::new(|_| Ok(LookupStatus::NotFound)),
            fast_config(),
        );
        let outcome = verifier
            .check_domains_with_abort(&[], watch::channel(false).1)
            .await
            .unwrap();
        assert_eq!(outcome, VerifyOutcome::Completed(Vec::new()));
    }

    // ── Rate limiting ───────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_single_worker_respects_interval() {
        let rate = Duration::from_millis(100);
        let lookup = Arc::new(FakeLookup::new(|_| Ok(LookupStatus::NotFound)));
        let config = CheckConfig::default()
            .with_concurrency(1)
            .with_rate_limit(rate);
        let verifier = AvailabilityVerifier::with_shared(Arc::clone(&lookup), config);

        verifier.check_domains(&domains(6)).await.unwrap();

        let calls = lookup.calls.lock().unwrap();
        assert_eq!(calls.len(), 6);
        for pair in calls.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= rate);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_scopes_use_scaled_interval() {
        let lookup = Arc::new(FakeLookup::new(|_| Ok(LookupStatus::NotFound)));
        let config = CheckConfig::default()
            .with_concurrency(2)
            .with_rate_limit(Duration::from_millis(100));
        let verifier = AvailabilityVerifier::with_shared(Arc::clone(&lookup), config);

        let input = domains(6);
        verifier.check_domains(&input).await.unwrap();

        // Worker 0 handles name0, name2, name4
        let calls = lookup.calls.lock().unwrap();
        let worker0: Vec<Instant> = calls
            .iter()
            .filter(|(d, _)| ["name0.com", "name2.com", "name4.com"].contains(&d.as_str()))
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(worker0.len(), 3);
        for pair in worker0.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(200));
        }
    }

    // ── Interrupts ──────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_abort_returns_partial_results() {
        let lookup = FakeLookup::new(|_| Ok(LookupStatus::NotFound))
            .with_delay(Duration::from_secs(1));
        let config = CheckConfig::default()
            .with_concurrency(1)
            .with_rate_limit(Duration::ZERO);
        let verifier = AvailabilityVerifier::new(lookup, config);

        let (tx, rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            let _ = tx.send(true);
        });

        let outcome = verifier
            .check_domains_with_abort(&domains(3), rx)
            .await
            .unwrap();

        match outcome {
            VerifyOutcome::Interrupted { completed, pending } => {
                assert_eq!(completed, vec![CheckResult::new("name0.com", true)]);
                assert_eq!(pending, 2);
            }
            other => panic!("expected interrupt, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_before_start_checks_nothing() {
        let lookup = Arc::new(FakeLookup::new(|_| Ok(LookupStatus::NotFound)));
        let verifier = AvailabilityVerifier::with_shared(Arc::clone(&lookup), fast_config());

        let (_tx, rx) = watch::channel(true);
        let outcome = verifier
            .check_domains_with_abort(&domains(5), rx)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            VerifyOutcome::Interrupted {
                completed: Vec::new(),
                pending: 5
            }
        );
        assert!(lookup.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_abort_sender_is_not_an_abort() {
        let verifier = AvailabilityVerifier::new(
            FakeLookup::new(|_| Ok(LookupStatus::NotFound)),
            fast_config(),
        );
        let (tx, rx) = watch::channel(false);
        drop(tx);

        let outcome = verifier
            .check_domains_with_abort(&domains(4), rx)
            .await
            .unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.results().len(), 4);
    }
}
