//! Per-source hourly call budgets

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use veritas_core::SourceConfig;

use crate::error::VerifyError;

const WINDOW: Duration = Duration::from_secs(3600);

struct Window {
    started: Instant,
    used: u32,
}

/// Fixed one-hour windows per source.
///
/// A source with `rate_limit_per_hour == 0` is never limited. Only live
/// calls take from the budget; cache hits are free.
pub struct RateLimiter {
    limits: HashMap<String, u32>,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(sources: &[SourceConfig]) -> Self {
        Self {
            limits: sources
                .iter()
                .map(|s| (s.id.clone(), s.rate_limit_per_hour))
                .collect(),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Take one call from `source_id`'s budget
    pub fn try_acquire(&self, source_id: &str) -> Result<(), VerifyError> {
        let limit = self.limits.get(source_id).copied().unwrap_or(0);
        if limit == 0 {
            return Ok(());
        }

        let now = Instant::now();
        let mut windows = self.windows.lock();
        let window = windows.entry(source_id.to_string()).or_insert(Window {
            started: now,
            used: 0,
        });

        if now.duration_since(window.started) >= WINDOW {
            window.started = now;
            window.used = 0;
        }

        if window.used >= limit {
            return Err(VerifyError::RateLimited);
        }
        window.used += 1;
        Ok(())
    }

    /// Calls left in the current window; `None` when unlimited
    pub fn remaining(&self, source_id: &str) -> Option<u32> {
        let limit = self.limits.get(source_id).copied().unwrap_or(0);
        if limit == 0 {
            return None;
        }
        let windows = self.windows.lock();
        let used = windows
            .get(source_id)
            .filter(|w| w.started.elapsed() < WINDOW)
            .map(|w| w.used)
            .unwrap_or(0);
        Some(limit.saturating_sub(used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn budget_resets_each_hour() {
        let limiter = RateLimiter::new(&[SourceConfig::new("factcheck_org", 0.25).with_rate_limit(2)]);

        assert!(limiter.try_acquire("factcheck_org").is_ok());
        assert!(limiter.try_acquire("factcheck_org").is_ok());
        assert_eq!(
            limiter.try_acquire("factcheck_org"),
            Err(VerifyError::RateLimited)
        );
        assert_eq!(limiter.remaining("factcheck_org"), Some(0));

        tokio::time::advance(WINDOW).await;
        assert_eq!(limiter.remaining("factcheck_org"), Some(2));
        assert!(limiter.try_acquire("factcheck_org").is_ok());
    }

    #[tokio::test]
    async fn zero_and_unknown_are_unlimited() {
        let limiter = RateLimiter::new(&[SourceConfig::new("open", 1.0)]);
        for _ in 0..1000 {
            assert!(limiter.try_acquire("open").is_ok());
            assert!(limiter.try_acquire("unregistered").is_ok());
        }
        assert_eq!(limiter.remaining("open"), None);
    }
}
