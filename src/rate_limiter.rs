//! Per-domain politeness and bounded concurrency (§4.8).
//!
//! A bounded counting [`tokio::sync::Semaphore`] caps the number of page
//! sessions active at once; a per-domain last-access map enforces a minimum
//! spacing between two fetches against the same registrable domain. Both
//! live behind one lock so the "sleep then update" window (§5) is atomic:
//! nothing else can observe a stale `last[D]` while we're waiting on it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;
use tracing::debug;

/// Held by the caller for the lifetime of one page session. Dropping it
/// releases the global concurrency slot.
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}

#[derive(Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    domain_interval: Duration,
    last_access: Arc<Mutex<HashMap<String, Instant>>>,
}

impl RateLimiter {
    /// `max_concurrent`: global bound on page sessions active at once.
    /// `domain_interval`: minimum spacing between two fetches against the
    /// same registrable domain.
    pub fn new(max_concurrent: u32, domain_interval: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1) as usize)),
            domain_interval,
            last_access: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Acquires a global concurrency slot and waits out any remaining
    /// per-domain spacing for `domain`, in that order. Returns a guard that
    /// releases the slot on drop.
    pub async fn acquire(&self, domain: &str) -> RateLimitGuard {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("rate limiter semaphore is never closed");

        self.wait_for_domain(domain).await;

        RateLimitGuard { _permit: permit }
    }

    async fn wait_for_domain(&self, domain: &str) {
        let mut last_access = self.last_access.lock().await;

        if let Some(&last) = last_access.get(domain) {
            let elapsed = last.elapsed();
            if elapsed < self.domain_interval {
                let remaining = self.domain_interval - elapsed;
                debug!(domain, remaining_ms = remaining.as_millis() as u64, "rate limiting");
                tokio::time::sleep(remaining).await;
            }
        }

        last_access.insert(domain.to_string(), Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_acquire_succeeds_immediately_for_new_domain() {
        let limiter = RateLimiter::new(5, Duration::from_millis(50));
        let start = Instant::now();
        let _guard = limiter.acquire("example.com").await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_second_acquire_for_same_domain_waits() {
        let limiter = RateLimiter::new(5, Duration::from_millis(100));

        {
            let _guard = limiter.acquire("example.com").await;
        }

        let start = Instant::now();
        let _guard = limiter.acquire("example.com").await;
        assert!(start.elapsed() >= Duration::from_millis(90));
    }

    #[tokio::test]
    async fn test_different_domains_do_not_block_each_other() {
        let limiter = RateLimiter::new(5, Duration::from_millis(200));

        {
            let _guard = limiter.acquire("a.example.com").await;
        }

        let start = Instant::now();
        let _guard = limiter.acquire("b.example.com").await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_global_concurrency_bound_serializes_extra_acquires() {
        let limiter = RateLimiter::new(1, Duration::from_millis(0));
        let guard1 = limiter.acquire("a.example.com").await;

        let limiter2 = limiter.clone();
        let handle = tokio::spawn(async move {
            let _guard2 = limiter2.acquire("b.example.com").await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        drop(guard1);
        handle.await.unwrap();
    }
}
