//! Idle gestures performed after a chat opens.

use rand::Rng;

use crate::command;

/// A scroll or a tap with randomized coordinates, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleGesture {
	Swipe {
		x: u32,
		y_start: u32,
		y_end: u32,
		duration_ms: u32,
	},
	Tap {
		x: u32,
		y: u32,
	},
}

impl IdleGesture {
	/// Scroll or tap with equal probability.
	///
	/// Swipes run vertically near the horizontal centre, from the lower to the
	/// upper part of the screen over 300-700ms. Taps land in the chat area.
	pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
		if rng.gen_bool(0.5) {
			IdleGesture::Swipe {
				x: rng.gen_range(500..700),
				y_start: rng.gen_range(1500..1800),
				y_end: rng.gen_range(300..600),
				duration_ms: rng.gen_range(300..700),
			}
		} else {
			IdleGesture::Tap {
				x: rng.gen_range(300..700),
				y: rng.gen_range(800..1400),
			}
		}
	}

	pub fn instruction(&self) -> String {
		match *self {
			IdleGesture::Swipe {
				x,
				y_start,
				y_end,
				duration_ms,
			} => command::swipe(x, y_start, x, y_end, duration_ms),
			IdleGesture::Tap { x, y } => command::tap(x, y),
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn gestures_stay_within_bounds_and_both_kinds_occur() {
		let mut rng = StdRng::seed_from_u64(42);
		let (mut swipes, mut taps) = (0, 0);
		for _ in 0..400 {
			match IdleGesture::random(&mut rng) {
				IdleGesture::Swipe {
					x,
					y_start,
					y_end,
					duration_ms,
				} => {
					swipes += 1;
					assert!((500..700).contains(&x));
					assert!((1500..1800).contains(&y_start));
					assert!((300..600).contains(&y_end));
					assert!((300..700).contains(&duration_ms));
				}
				IdleGesture::Tap { x, y } => {
					taps += 1;
					assert!((300..700).contains(&x));
					assert!((800..1400).contains(&y));
				}
			}
		}
		assert!(swipes > 100 && taps > 100, "swipes={swipes} taps={taps}");
	}

	#[test]
	fn swipe_keeps_x_constant() {
		let g = IdleGesture::Swipe {
			x: 600,
			y_start: 1600,
			y_end: 400,
			duration_ms: 500,
		};
		assert_eq!(g.instruction(), "input touchscreen swipe 600 1600 600 400 500");
		assert_eq!(IdleGesture::Tap { x: 310, y: 900 }.instruction(), "input tap 310 900");
	}
}
