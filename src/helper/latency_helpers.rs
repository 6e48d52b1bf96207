use futures_util::future::{self, BoxFuture, FutureExt};
use rand::Rng;
use std::time::Duration;

/// Produces the artificial wait every `PortalApi` call performs before it
/// touches any data. Implementations must always resolve.
pub trait LatencyStrategy: Send + Sync {
    fn delay(&self) -> BoxFuture<'static, ()>;
}

/// Sleeps for a duration drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct RandomLatency {
    min: Duration,
    max: Duration,
}

impl RandomLatency {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn range(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }

    fn sample(&self) -> Duration {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for RandomLatency {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_millis(600))
    }
}

impl LatencyStrategy for RandomLatency {
    fn delay(&self) -> BoxFuture<'static, ()> {
        // Sampled here: the thread-local rng cannot be held across an await.
        let wait = self.sample();
        log::trace!("Simulating {:?} of latency", wait);
        tokio::time::sleep(wait).boxed()
    }
}

/// Resolves immediately; keeps tests deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl LatencyStrategy for NoLatency {
    fn delay(&self) -> BoxFuture<'static, ()> {
        future::ready(()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn inverted_range_is_normalised() {
        let latency = RandomLatency::new(Duration::from_millis(600), Duration::from_millis(100));
        assert_eq!(latency.range(), (Duration::from_millis(100), Duration::from_millis(600)));
    }

    #[test]
    fn samples_stay_inside_the_range() {
        let latency = RandomLatency::default();
        for _ in 0..500 {
            let wait = latency.sample();
            assert!(wait >= Duration::from_millis(100) && wait <= Duration::from_millis(600));
        }
        let fixed = RandomLatency::new(Duration::from_millis(5), Duration::from_millis(5));
        assert_eq!(fixed.sample(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn random_delay_waits_at_least_the_minimum() {
        let latency = RandomLatency::new(Duration::from_millis(100), Duration::from_millis(600));
        let started = Instant::now();
        latency.delay().await;
        let waited = started.elapsed();
        assert!(waited >= Duration::from_millis(100));
        assert!(waited <= Duration::from_millis(601));
    }

    #[tokio::test]
    async fn no_latency_resolves_immediately() {
        let started = std::time::Instant::now();
        NoLatency.delay().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
