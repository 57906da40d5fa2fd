use async_trait::async_trait;
use hostsync_application::ports::Throttle;
use std::time::Duration;

/// Sleeps for a fixed delay before every mutating call.
pub struct FixedDelayThrottle {
    delay: Duration,
}

impl FixedDelayThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Throttle for FixedDelayThrottle {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits. Used for dry runs and tests.
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn pause(&self) {}
}
