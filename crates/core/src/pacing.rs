//! Randomized waits.
//!
//! Every "human" delay is a [`DelayRange`] sampled with the caller's RNG and
//! handed to a [`Pacer`]. Production uses [`TokioPacer`]; tests inject a pacer
//! that returns immediately and records what it was asked to wait.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval of milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayRange {
	pub min_ms: u64,
	pub max_ms: u64,
}

impl DelayRange {
	pub const ZERO: Self = Self::fixed(0);

	pub const fn new(min_ms: u64, max_ms: u64) -> Self {
		Self { min_ms, max_ms }
	}

	pub const fn fixed(ms: u64) -> Self {
		Self { min_ms: ms, max_ms: ms }
	}

	/// Draws a duration uniformly from `[min_ms, max_ms]`. Reversed bounds are
	/// swapped rather than rejected.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
		let (lo, hi) = if self.min_ms <= self.max_ms {
			(self.min_ms, self.max_ms)
		} else {
			(self.max_ms, self.min_ms)
		};
		Duration::from_millis(rng.gen_range(lo..=hi))
	}
}

/// Half-open probability interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
	pub min: f64,
	pub max: f64,
}

impl RateRange {
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	pub const fn fixed(rate: f64) -> Self {
		Self { min: rate, max: rate }
	}

	/// Draws a probability, clamped to `[0, 1]`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		let rate = if self.max > self.min {
			rng.gen_range(self.min..self.max)
		} else {
			self.min
		};
		clamp_probability(rate)
	}
}

pub(crate) fn clamp_probability(p: f64) -> f64 {
	if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Turns a sampled duration into an actual wait.
#[async_trait]
pub trait Pacer: Send + Sync {
	async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
	async fn pause(&self, duration: Duration) {
		if !duration.is_zero() {
			tokio::time::sleep(duration).await;
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn delay_sample_stays_in_closed_interval() {
		let mut rng = StdRng::seed_from_u64(7);
		let range = DelayRange::new(80, 200);
		for _ in 0..1000 {
			let d = range.sample(&mut rng).as_millis() as u64;
			assert!((80..=200).contains(&d), "{d} out of range");
		}
	}

	#[test]
	fn reversed_delay_bounds_are_swapped() {
		let mut rng = StdRng::seed_from_u64(7);
		let d = DelayRange::new(10, 5).sample(&mut rng).as_millis() as u64;
		assert!((5..=10).contains(&d));
	}

	#[test]
	fn fixed_delay_is_exact() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(DelayRange::fixed(250).sample(&mut rng), Duration::from_millis(250));
		assert_eq!(DelayRange::ZERO.sample(&mut rng), Duration::ZERO);
	}

	#[test]
	fn rate_sample_is_clamped() {
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(RateRange::fixed(1.5).sample(&mut rng), 1.0);
		assert_eq!(RateRange::fixed(-0.2).sample(&mut rng), 0.0);
		for _ in 0..100 {
			let r = RateRange::new(0.03, 0.10).sample(&mut rng);
			assert!((0.03..0.10).contains(&r));
		}
	}

	#[tokio::test(start_paused = true)]
	async fn tokio_pacer_waits_for_duration() {
		let start = tokio::time::Instant::now();
		TokioPacer.pause(Duration::from_millis(1500)).await;
		assert!(start.elapsed() >= Duration::from_millis(1500));
	}
}
