//! Randomized spacing between downloads.
//!
//! After each successful download the driver waits a whole number of seconds
//! drawn uniformly from `[min, max]` (inclusive) before the next turn.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// `min > max` is rejected up front instead of failing at the first draw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("min wait ({min}s) must not exceed max wait ({max}s)")]
pub struct PacingError {
    pub min: u64,
    pub max: u64,
}

/// Draws pacing delays from a validated range.
#[derive(Debug)]
pub struct Pacer<R = StdRng> {
    min_secs: u64,
    max_secs: u64,
    rng: R,
}

impl Pacer<StdRng> {
    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self, PacingError> {
        Self::with_rng(min_secs, max_secs, StdRng::from_entropy())
    }
}

impl<R: Rng> Pacer<R> {
    pub fn with_rng(min_secs: u64, max_secs: u64, rng: R) -> Result<Self, PacingError> {
        if min_secs > max_secs {
            return Err(PacingError {
                min: min_secs,
                max: max_secs,
            });
        }
        Ok(Self {
            min_secs,
            max_secs,
            rng,
        })
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_secs(self.min_secs),
            Duration::from_secs(self.max_secs),
        )
    }

    pub fn next_delay(&mut self) -> Duration {
        Duration::from_secs(self.rng.gen_range(self.min_secs..=self.max_secs))
    }
}

/// Where the pacing wait actually happens; tests substitute a recorder.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
