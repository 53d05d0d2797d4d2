//! Concurrent claim verification
//!
//! For each claim (up to `max_verified_claims`) and each enabled source:
//!
//! 1. a fresh cache entry is reused as is;
//! 2. otherwise a live call is spawned; once it holds a worker-pool slot it
//!    takes one call from the source's hourly budget and runs under a
//!    per-call timeout;
//! 3. the whole batch runs under one deadline; calls still pending when it
//!    passes are aborted and recorded as `error` verdicts.
//!
//! A failed call only ever affects its own (claim, source) pair. Calls
//! aborted before reaching a worker slot cost no budget. Successful verdicts
//! are cached. Results come back in input claim order.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};
use veritas::tracing::prefix;
use veritas_core::{validate_sources, Claim, ClaimConsensus, SourceConfig, SourceVerdict};

use crate::cache::VerificationCache;
use crate::config::EngineConfig;
use crate::error::{PipelineError, VerifyError};
use crate::rate_limit::RateLimiter;
use crate::source::SourceVerifier;

const BATCH_DEADLINE_DETAIL: &str = "batch deadline exceeded";
const INCOMPLETE_DETAIL: &str = "verification task did not complete";

type JobKey = (usize, String);

/// Fans claims out to sources and reduces each claim to a consensus
pub struct ConsensusEngine {
    sources: Vec<SourceConfig>,
    verifiers: HashMap<String, Arc<dyn SourceVerifier>>,
    cache: Arc<VerificationCache>,
    limiter: Arc<RateLimiter>,
    config: EngineConfig,
}

impl ConsensusEngine {
    /// Every enabled source needs a verifier with a matching id.
    pub fn new(
        sources: Vec<SourceConfig>,
        verifiers: Vec<Arc<dyn SourceVerifier>>,
        cache: Arc<VerificationCache>,
        config: EngineConfig,
    ) -> Result<Self, PipelineError> {
        validate_sources(&sources)?;

        let verifiers: HashMap<String, Arc<dyn SourceVerifier>> = verifiers
            .into_iter()
            .map(|v| (v.id().to_string(), v))
            .collect();

        if let Some(missing) = sources
            .iter()
            .find(|s| s.enabled && !verifiers.contains_key(&s.id))
        {
            return Err(PipelineError::MissingVerifier(missing.id.clone()));
        }

        Ok(Self {
            limiter: Arc::new(RateLimiter::new(&sources)),
            sources,
            verifiers,
            cache,
            config,
        })
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub fn cache(&self) -> &VerificationCache {
        &self.cache
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Verify the leading claims and compute one consensus per claim.
    ///
    /// Never fails: every problem is recorded as an `error` verdict.
    pub async fn verify_claims(&self, claims: &[Claim]) -> Vec<ClaimConsensus> {
        let claims = &claims[..claims.len().min(self.config.max_verified_claims)];
        if claims.is_empty() {
            return Vec::new();
        }

        let mut verdicts: Vec<Vec<SourceVerdict>> = vec![Vec::new(); claims.len()];
        let mut jobs: Vec<JobKey> = Vec::new();
        let mut cached = 0;

        for (idx, claim) in claims.iter().enumerate() {
            let hash = claim.hash();
            for source in self.sources.iter().filter(|s| s.enabled) {
                match self.cache.get(&hash, &source.id) {
                    Some(verdict) => {
                        debug!("{} {} {}: cache hit", prefix::CACHE, hash, source.id);
                        cached += 1;
                        verdicts[idx].push(verdict);
                    }
                    None => jobs.push((idx, source.id.clone())),
                }
            }
        }

        let live = jobs.len();
        info!(
            "{} verifying {} claims: {} cached, {} live calls",
            prefix::VERIFY,
            claims.len(),
            cached,
            live
        );

        for (idx, verdict) in self.run_batch(claims, jobs).await {
            if !verdict.is_error() {
                self.cache.put(claims[idx].hash(), verdict.clone());
            }
            verdicts[idx].push(verdict);
        }

        claims
            .iter()
            .cloned()
            .zip(verdicts)
            .map(|(claim, v)| ClaimConsensus::new(claim, v, &self.sources))
            .collect()
    }

    /// Run live calls concurrently; one verdict per job, in completion order.
    async fn run_batch(&self, claims: &[Claim], jobs: Vec<JobKey>) -> Vec<(usize, SourceVerdict)> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let deadline = Instant::now() + self.config.batch_timeout();
        let per_call = self.config.per_call_timeout();
        let pool = Arc::new(Semaphore::new(jobs.len().min(self.config.max_in_flight).max(1)));

        let mut set = JoinSet::new();
        let mut outstanding: HashSet<JobKey> = HashSet::new();
        let mut results = Vec::with_capacity(jobs.len());

        for (idx, source_id) in jobs {
            let Some(verifier) = self.verifiers.get(&source_id).cloned() else {
                results.push((
                    idx,
                    SourceVerdict::error(&source_id, "no verifier registered"),
                ));
                continue;
            };
            let claim = claims[idx].clone();
            let pool = Arc::clone(&pool);
            let limiter = Arc::clone(&self.limiter);
            outstanding.insert((idx, source_id.clone()));

            set.spawn(async move {
                let result = match pool.acquire_owned().await {
                    Ok(_permit) => match limiter.try_acquire(&source_id) {
                        Ok(()) => {
                            if let Some(left) = limiter.remaining(&source_id) {
                                debug!(
                                    "{} {}: {} calls left this hour",
                                    prefix::VERIFY,
                                    source_id,
                                    left
                                );
                            }
                            match timeout(per_call, verifier.verify(&claim)).await {
                                Ok(result) => result,
                                Err(_) => Err(VerifyError::Timeout(per_call)),
                            }
                        }
                        Err(e) => Err(e),
                    },
                    Err(_) => Err(VerifyError::Internal("worker pool closed".to_string())),
                };
                (idx, source_id, result)
            });
        }

        let mut deadline_hit = false;
        loop {
            match timeout_at(deadline, set.join_next()).await {
                Ok(Some(Ok((idx, source_id, result)))) => {
                    outstanding.remove(&(idx, source_id.clone()));
                    let verdict = match result {
                        Ok(report) => report.into_verdict(source_id),
                        Err(e) => {
                            warn!("{} claim {} {}: {}", prefix::VERIFY, idx, source_id, e);
                            SourceVerdict::error(source_id, e.to_string())
                        }
                    };
                    results.push((idx, verdict));
                }
                Ok(Some(Err(join_err))) => {
                    warn!("{} verification task failed: {}", prefix::VERIFY, join_err);
                }
                Ok(None) => break,
                Err(_) => {
                    deadline_hit = true;
                    warn!(
                        "{} batch deadline reached with {} calls pending",
                        prefix::VERIFY,
                        outstanding.len()
                    );
                    set.abort_all();
                    break;
                }
            }
        }

        let detail = if deadline_hit {
            BATCH_DEADLINE_DETAIL
        } else {
            INCOMPLETE_DETAIL
        };
        results.extend(
            outstanding
                .into_iter()
                .map(|(idx, source_id)| (idx, SourceVerdict::error(source_id, detail))),
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::source::{simulated_sources, SourceReport};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use veritas_core::{default_sources, ExtractionPattern, VerdictStatus};

    struct Fixed {
        id: &'static str,
        rating: &'static str,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(id: &'static str, rating: &'static str, delay_ms: u64) -> Arc<Self> {
            Arc::new(Self {
                id,
                rating,
                delay: Duration::from_millis(delay_ms),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SourceVerifier for Fixed {
        fn id(&self) -> &str {
            self.id
        }

        async fn verify(&self, _claim: &Claim) -> Result<SourceReport, VerifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(SourceReport::new(self.rating, 0.9, "fixed"))
        }
    }

    struct Panics;

    #[async_trait]
    impl SourceVerifier for Panics {
        fn id(&self) -> &str {
            "panics"
        }

        async fn verify(&self, _claim: &Claim) -> Result<SourceReport, VerifyError> {
            panic!("source blew up");
        }
    }

    fn claims(n: usize) -> Vec<Claim> {
        (0..n)
            .map(|i| Claim::new(format!("claim number {i}"), ExtractionPattern::FactualSentence))
            .collect()
    }

    fn engine(
        sources: Vec<SourceConfig>,
        verifiers: Vec<Arc<dyn SourceVerifier>>,
        config: EngineConfig,
    ) -> ConsensusEngine {
        ConsensusEngine::new(sources, verifiers, Arc::new(VerificationCache::default()), config)
            .unwrap()
    }

    #[test]
    fn missing_verifier_rejected() {
        let result = ConsensusEngine::new(
            default_sources(),
            Vec::new(),
            Arc::new(VerificationCache::default()),
            EngineConfig::default(),
        );
        assert!(matches!(result, Err(PipelineError::MissingVerifier(_))));
    }

    #[test]
    fn disabled_source_needs_no_verifier() {
        let sources = vec![SourceConfig::new("ghost", 1.0).disabled()];
        let result = ConsensusEngine::new(
            sources,
            Vec::new(),
            Arc::new(VerificationCache::default()),
            EngineConfig::default(),
        );
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn only_leading_claims_verified_in_order() {
        let engine = engine(default_sources(), simulated_sources(), EngineConfig::default());
        let results = engine.verify_claims(&claims(8)).await;

        assert_eq!(results.len(), 5);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.claim.text(), format!("claim number {i}"));
            assert_eq!(result.source_results.len(), 4);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn calls_run_concurrently() {
        let engine = engine(default_sources(), simulated_sources(), EngineConfig::default());
        let start = Instant::now();
        engine.verify_claims(&claims(5)).await;
        // Slowest source is 600ms; sequential would be 5 * 1.8s
        assert!(start.elapsed() < Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn per_call_timeout_isolated() {
        let slow = Fixed::new("slow", "false", 10_000);
        let fast = Fixed::new("fast", "true", 10);
        let sources = vec![SourceConfig::new("slow", 0.9), SourceConfig::new("fast", 0.1)];
        let engine = engine(
            sources,
            vec![slow.clone() as Arc<dyn SourceVerifier>, fast.clone()],
            EngineConfig::default(),
        );

        let results = engine.verify_claims(&claims(1)).await;
        let slow_verdict = &results[0].source_results["slow"];
        assert!(slow_verdict.is_error());
        assert!(slow_verdict.detail.contains("timed out"));
        assert_eq!(results[0].consensus, VerdictStatus::True);
        // Errors are not cached
        assert_eq!(engine.cache().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn batch_deadline_marks_pending_as_error() {
        let slow = Fixed::new("slow", "false", 3_000);
        let fast = Fixed::new("fast", "true", 10);
        let sources = vec![SourceConfig::new("slow", 0.5), SourceConfig::new("fast", 0.5)];
        let config = EngineConfig {
            batch_timeout_ms: 1_000,
            ..EngineConfig::default()
        };
        let engine = engine(sources, vec![slow as Arc<dyn SourceVerifier>, fast], config);

        let results = engine.verify_claims(&claims(2)).await;
        for result in &results {
            assert_eq!(result.source_results["slow"].detail, BATCH_DEADLINE_DETAIL);
            assert_eq!(result.consensus, VerdictStatus::True);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn worker_pool_bounds_in_flight_calls() {
        let one = Fixed::new("one", "true", 100);
        let config = EngineConfig {
            max_in_flight: 1,
            ..EngineConfig::default()
        };
        let engine = engine(
            vec![SourceConfig::new("one", 1.0)],
            vec![one as Arc<dyn SourceVerifier>],
            config,
        );

        let start = Instant::now();
        engine.verify_claims(&claims(3)).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_source_becomes_error() {
        let fast = Fixed::new("fast", "mixed", 10);
        let sources = vec![SourceConfig::new("panics", 0.5), SourceConfig::new("fast", 0.5)];
        let engine = engine(
            sources,
            vec![Arc::new(Panics) as Arc<dyn SourceVerifier>, fast],
            EngineConfig::default(),
        );

        let results = engine.verify_claims(&claims(1)).await;
        assert_eq!(results[0].source_results["panics"].detail, INCOMPLETE_DETAIL);
        assert_eq!(results[0].consensus, VerdictStatus::Mixture);
    }

    #[tokio::test(start_paused = true)]
    async fn cache_hits_skip_live_calls() {
        let counted = Fixed::new("counted", "true", 50);
        let engine = engine(
            vec![SourceConfig::new("counted", 1.0)],
            vec![counted.clone() as Arc<dyn SourceVerifier>],
            EngineConfig::default(),
        );

        engine.verify_claims(&claims(2)).await;
        engine.verify_claims(&claims(2)).await;
        assert_eq!(counted.calls.load(Ordering::SeqCst), 2);
        assert_eq!(engine.cache().stats().hits, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_calls_not_made() {
        let limited = Fixed::new("limited", "true", 10);
        let engine = engine(
            vec![SourceConfig::new("limited", 1.0).with_rate_limit(2)],
            vec![limited.clone() as Arc<dyn SourceVerifier>],
            EngineConfig::default(),
        );

        let results = engine.verify_claims(&claims(3)).await;
        assert_eq!(limited.calls.load(Ordering::SeqCst), 2);

        let refused: Vec<_> = results
            .iter()
            .filter(|r| r.source_results["limited"].is_error())
            .collect();
        assert_eq!(refused.len(), 1);
        assert_eq!(refused[0].source_results["limited"].detail, "rate limit exceeded");
        assert_eq!(refused[0].consensus, VerdictStatus::Unknown);
        assert_eq!(engine.rate_limiter().remaining("limited"), Some(0));
        // Refusals are not cached
        assert_eq!(engine.cache().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_calls_keep_their_budget() {
        let slow = Fixed::new("slow", "true", 3_000);
        let config = EngineConfig {
            max_in_flight: 1,
            batch_timeout_ms: 1_000,
            ..EngineConfig::default()
        };
        let engine = engine(
            vec![SourceConfig::new("slow", 1.0).with_rate_limit(5)],
            vec![slow.clone() as Arc<dyn SourceVerifier>],
            config,
        );

        let results = engine.verify_claims(&claims(3)).await;
        assert!(results
            .iter()
            .all(|r| r.source_results["slow"].detail == BATCH_DEADLINE_DETAIL));
        // Only the call holding the single worker slot was charged
        assert_eq!(slow.calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.rate_limiter().remaining("slow"), Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_cache_still_serves_recent() {
        let counted = Fixed::new("counted", "true", 5);
        let engine = ConsensusEngine::new(
            vec![SourceConfig::new("counted", 1.0)],
            vec![counted.clone() as Arc<dyn SourceVerifier>],
            Arc::new(VerificationCache::new(&CacheConfig {
                capacity: Some(1),
                ..CacheConfig::default()
            })),
            EngineConfig::default(),
        )
        .unwrap();

        engine.verify_claims(&claims(2)).await;
        assert_eq!(engine.cache().len(), 1);
    }
}
