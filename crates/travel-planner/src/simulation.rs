//! Simulated Remote Calls
//!
//! The travel tools stand in for remote services: each call waits a random
//! amount of time and some may fail. Randomness comes from a seedable source
//! so tests can reproduce distributions.

use std::ops::Range;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

/// Uniform latency window in seconds, upper bound exclusive
#[derive(Clone, Debug, PartialEq)]
pub struct Latency {
    secs: Range<f64>,
}

impl Latency {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self {
            secs: min_secs..max_secs,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_secs_f64(rng.gen_range(self.secs.clone()))
    }

    pub const fn min_secs(&self) -> f64 {
        self.secs.start
    }

    pub const fn max_secs(&self) -> f64 {
        self.secs.end
    }
}

pub const DESTINATION_LATENCY: Latency = Latency::new(0.0, 0.99);
pub const WEATHER_LATENCY: Latency = Latency::new(0.3, 3.7);
pub const DATETIME_LATENCY: Latency = Latency::new(0.10, 5.0);

/// Random source shared by the calls of one tool
pub struct Simulation {
    rng: Mutex<StdRng>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Simulation {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic source for tests and reproducible demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw from the random source. The lock is released before returning,
    /// so callers can sleep on the result without blocking other calls.
    pub async fn draw<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().await;
        f(&mut *rng)
    }
}

/// Sleep for the simulated network latency
pub async fn wait(latency: Duration) {
    tracing::trace!(?latency, "Simulating network latency");
    tokio::time::sleep(latency).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_stays_in_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for latency in [DESTINATION_LATENCY, WEATHER_LATENCY, DATETIME_LATENCY] {
            for _ in 0..1000 {
                let secs = latency.sample(&mut rng).as_secs_f64();
                assert!(secs >= latency.min_secs() && secs < latency.max_secs());
            }
        }
    }

    #[tokio::test]
    async fn test_seeded_simulations_agree() {
        let a = Simulation::seeded(42);
        let b = Simulation::seeded(42);
        let xs: Vec<u32> = a.draw(|rng| (0..8).map(|_| rng.gen_range(0..100)).collect()).await;
        let ys: Vec<u32> = b.draw(|rng| (0..8).map(|_| rng.gen_range(0..100)).collect()).await;
        assert_eq!(xs, ys);
    }
}
