//! Pacing between content-graph lookups.

use std::time::Duration;

use async_trait::async_trait;

/// Waits between consecutive lookups.
#[async_trait]
pub trait DelayStrategy: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

#[async_trait]
impl DelayStrategy for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Does not wait at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl DelayStrategy for NoDelay {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps() {
        let start = tokio::time::Instant::now();
        FixedDelay::from_millis(250).pause().await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_returns_immediately() {
        let start = tokio::time::Instant::now();
        NoDelay.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
