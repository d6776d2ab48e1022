//! Shuffled ring buffer of links.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{Error, Result};

/// Serves links in one fixed shuffled order, forever.
///
/// The order is decided once at construction; every cycle repeats it.
#[derive(Debug, Clone)]
pub struct ContentRotator {
	items: Vec<String>,
	cursor: usize,
}

impl ContentRotator {
	/// Shuffles `items` once with `rng`.
	pub fn shuffled<R: Rng + ?Sized>(mut items: Vec<String>, rng: &mut R) -> Result<Self> {
		items.shuffle(rng);
		Self::in_order(items)
	}

	/// Keeps the given order.
	pub fn in_order(items: Vec<String>) -> Result<Self> {
		if items.is_empty() {
			return Err(Error::invalid_input("No links available"));
		}
		Ok(Self { items, cursor: 0 })
	}

	/// Returns the current item and advances the cursor, wrapping at the end.
	pub fn next(&mut self) -> String {
		let item = self.items[self.cursor].clone();
		self.cursor = (self.cursor + 1) % self.items.len();
		item
	}

	pub fn order(&self) -> &[String] {
		&self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn links(n: usize) -> Vec<String> {
		(1..=n).map(|i| format!("L{i}")).collect()
	}

	#[test]
	fn empty_input_is_rejected() {
		let mut rng = StdRng::seed_from_u64(0);
		assert!(ContentRotator::shuffled(Vec::new(), &mut rng).unwrap_err().is_invalid_input());
	}

	#[test]
	fn cycles_repeat_the_same_shuffled_order() {
		let mut rng = StdRng::seed_from_u64(99);
		let mut rotator = ContentRotator::shuffled(links(5), &mut rng).unwrap();
		let order = rotator.order().to_vec();

		let mut sorted = order.clone();
		sorted.sort();
		assert_eq!(sorted, links(5));

		let served: Vec<String> = (0..17).map(|_| rotator.next()).collect();
		for (i, item) in served.iter().enumerate() {
			assert_eq!(item, &order[i % 5]);
		}
	}

	#[test]
	fn single_item_repeats() {
		let mut rotator = ContentRotator::in_order(vec!["only".into()]).unwrap();
		for _ in 0..3 {
			assert_eq!(rotator.next(), "only");
		}
	}
}
