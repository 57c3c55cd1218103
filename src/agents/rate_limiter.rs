//! @ai:module:intent Per-agent request pacing
//! @ai:module:layer infrastructure
//! @ai:module:public_api RateLimiter, RateLimiterTrait
//! @ai:module:stateless false

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// @ai:intent Trait for rate limiting functionality
pub trait RateLimiterTrait: Send + Sync {
    /// @ai:intent Wait until a request is allowed
    fn wait(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// @ai:intent Token bucket allowing `requests_per_minute` queries, bursting up to the same amount
///
/// A limit of zero disables pacing.
#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<BucketState>>,
    requests_per_minute: u32,
}

struct BucketState {
    tokens: f64,
    last_update: Instant,
}

impl BucketState {
    fn refill(&mut self, rpm: u32) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * rpm as f64 / 60.0).min(rpm as f64);
        self.last_update = now;
    }
}

impl RateLimiter {
    /// @ai:intent Create a full bucket
    /// @ai:effects pure
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(BucketState {
                tokens: requests_per_minute as f64,
                last_update: Instant::now(),
            })),
            requests_per_minute,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn is_unlimited(&self) -> bool {
        self.requests_per_minute == 0
    }

    /// @ai:intent Take a token if one is available, else report how long until one is
    /// @ai:effects state:write
    async fn try_acquire(&self) -> Result<(), Duration> {
        let mut state = self.state.lock().await;
        state.refill(self.requests_per_minute);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            return Ok(());
        }

        let per_second = self.requests_per_minute as f64 / 60.0;
        Err(Duration::from_secs_f64((1.0 - state.tokens) / per_second))
    }
}

impl RateLimiterTrait for RateLimiter {
    /// @ai:intent Wait until a request is allowed
    /// @ai:effects state:write, time
    async fn wait(&self) {
        if self.is_unlimited() {
            return;
        }

        while let Err(delay) = self.try_acquire().await {
            tracing::debug!("Rate limit reached, waiting {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter_allows_initial_requests() {
        let limiter = RateLimiter::new(60);

        let start = Instant::now();
        limiter.wait().await;

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_rate_limiter_throttles_excess_requests() {
        let limiter = RateLimiter::new(60);

        for _ in 0..60 {
            limiter.wait().await;
        }

        let start = Instant::now();
        limiter.wait().await;

        assert!(start.elapsed() >= Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_zero_limit_never_waits() {
        let limiter = RateLimiter::unlimited();

        let start = Instant::now();
        for _ in 0..1000 {
            limiter.wait().await;
        }

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_clones_share_the_bucket() {
        let limiter = RateLimiter::new(2);
        let clone = limiter.clone();

        limiter.wait().await;
        clone.wait().await;

        assert!(limiter.try_acquire().await.is_err());
    }
}
