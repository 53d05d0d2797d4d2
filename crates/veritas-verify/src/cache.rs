//! Time-bounded verification cache
//!
//! Keyed by (claim hash, source id). Entries older than the TTL read as
//! misses and are overwritten by the next successful lookup; they are never
//! deleted on their own. With a capacity set, the oldest insertions are
//! evicted first once it is exceeded.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::time::Instant;
use veritas_core::{ClaimHash, SourceVerdict};

use crate::config::CacheConfig;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub verdict: SourceVerdict,
    pub created_at: Instant,
}

/// Hit/miss counters since construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<ClaimHash, HashMap<String, CacheEntry>>,
    /// Insertion order for capacity eviction
    order: VecDeque<(ClaimHash, String)>,
    len: usize,
}

impl CacheInner {
    fn remove(&mut self, hash: &ClaimHash, source_id: &str) -> bool {
        let Some(per_source) = self.entries.get_mut(hash) else {
            return false;
        };
        let removed = per_source.remove(source_id).is_some();
        if per_source.is_empty() {
            self.entries.remove(hash);
        }
        if removed {
            self.len -= 1;
        }
        removed
    }
}

/// Shared (claim, source) → verdict memo, safe for concurrent use
pub struct VerificationCache {
    ttl: Duration,
    capacity: Option<usize>,
    inner: RwLock<CacheInner>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for VerificationCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl VerificationCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            capacity: config.capacity,
            inner: RwLock::new(CacheInner::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Fresh verdict for this claim and source, if any
    pub fn get(&self, hash: &ClaimHash, source_id: &str) -> Option<SourceVerdict> {
        let found = {
            let inner = self.inner.read();
            inner
                .entries
                .get(hash)
                .and_then(|per_source| per_source.get(source_id))
                .filter(|entry| entry.created_at.elapsed() < self.ttl)
                .map(|entry| entry.verdict.clone())
        };

        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store a verdict under its source id; last write wins
    pub fn put(&self, hash: ClaimHash, verdict: SourceVerdict) {
        let source_id = verdict.source_id.clone();
        let entry = CacheEntry {
            verdict,
            created_at: Instant::now(),
        };

        let mut inner = self.inner.write();
        if inner.remove(&hash, &source_id) {
            inner.order.retain(|(h, s)| !(h == &hash && s == &source_id));
        }
        inner
            .entries
            .entry(hash)
            .or_default()
            .insert(source_id.clone(), entry);
        inner.order.push_back((hash, source_id));
        inner.len += 1;

        if let Some(capacity) = self.capacity {
            while inner.len > capacity {
                let Some((old_hash, old_source)) = inner.order.pop_front() else {
                    break;
                };
                inner.remove(&old_hash, &old_source);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(source: &str, rating: &str) -> SourceVerdict {
        SourceVerdict::from_rating(source, rating, 0.7, "")
    }

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl_miss_after() {
        let cache = VerificationCache::default();
        let hash = ClaimHash::of("the dam holds 2 billion litres");
        cache.put(hash, verdict("snopes", "true"));

        tokio::time::advance(Duration::from_secs(23 * 3600)).await;
        assert_eq!(cache.get(&hash, "snopes").unwrap().rating, "true");

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(cache.get(&hash, "snopes").is_none());
        // Stale entries stay until overwritten
        assert_eq!(cache.len(), 1);

        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[tokio::test]
    async fn keyed_per_source() {
        let cache = VerificationCache::default();
        let hash = ClaimHash::of("claim");
        cache.put(hash, verdict("snopes", "true"));
        assert!(cache.get(&hash, "politifact").is_none());
        assert!(cache.get(&ClaimHash::of("Claim"), "snopes").is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces() {
        let cache = VerificationCache::default();
        let hash = ClaimHash::of("claim");
        cache.put(hash, verdict("snopes", "true"));
        cache.put(hash, verdict("snopes", "false"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&hash, "snopes").unwrap().rating, "false");
    }

    #[tokio::test]
    async fn capacity_evicts_oldest_first() {
        let cache = VerificationCache::new(&CacheConfig {
            capacity: Some(2),
            ..CacheConfig::default()
        });
        let a = ClaimHash::of("a");
        let b = ClaimHash::of("b");
        let c = ClaimHash::of("c");

        cache.put(a, verdict("snopes", "true"));
        cache.put(b, verdict("snopes", "true"));
        // Rewriting `a` makes `b` the oldest
        cache.put(a, verdict("snopes", "false"));
        cache.put(c, verdict("snopes", "true"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&b, "snopes").is_none());
        assert!(cache.get(&a, "snopes").is_some());
        assert!(cache.get(&c, "snopes").is_some());
    }
}
