//! Characters the typing simulator can press, and their Android key codes.

use rand::Rng;

pub const KEYCODE_HOME: u16 = 3;
pub const KEYCODE_ENTER: u16 = 66;
pub const KEYCODE_DEL: u16 = 67;

/// Supported characters. Anything else is skipped while typing.
///
/// `!` and `?` have no unshifted key code, so they land on `1` and `/`.
const KEYS: [(char, u16); 45] = [
	('a', 29),
	('b', 30),
	('c', 31),
	('d', 32),
	('e', 33),
	('f', 34),
	('g', 35),
	('h', 36),
	('i', 37),
	('j', 38),
	('k', 39),
	('l', 40),
	('m', 41),
	('n', 42),
	('o', 43),
	('p', 44),
	('q', 45),
	('r', 46),
	('s', 47),
	('t', 48),
	('u', 49),
	('v', 50),
	('w', 51),
	('x', 52),
	('y', 53),
	('z', 54),
	('0', 7),
	('1', 8),
	('2', 9),
	('3', 10),
	('4', 11),
	('5', 12),
	('6', 13),
	('7', 14),
	('8', 15),
	('9', 16),
	(' ', 62),
	(',', 55),
	('.', 56),
	('/', 76),
	('@', 77),
	('-', 69),
	('_', 69),
	('!', 8),
	('?', 76),
];

/// Returns the key code for `c`, or `None` if it cannot be typed.
pub fn key_code(c: char) -> Option<u16> {
	KEYS.iter().find(|(key, _)| *key == c).map(|(_, code)| *code)
}

/// Picks a key uniformly from the map; used for injected mistakes.
pub fn random_key<R: Rng + ?Sized>(rng: &mut R) -> u16 {
	KEYS[rng.gen_range(0..KEYS.len())].1
}

/// Characters followed by a longer "reading" pause.
pub fn is_punctuation(c: char) -> bool {
	matches!(c, ',' | '.' | '?' | '!')
}

pub fn supported_chars() -> impl Iterator<Item = char> {
	KEYS.iter().map(|(c, _)| *c)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn letters_and_digits_are_contiguous() {
		for (i, c) in ('a'..='z').enumerate() {
			assert_eq!(key_code(c), Some(29 + i as u16));
		}
		for (i, c) in ('0'..='9').enumerate() {
			assert_eq!(key_code(c), Some(7 + i as u16));
		}
		assert_eq!(key_code(' '), Some(62));
	}

	#[test]
	fn unsupported_characters_have_no_code() {
		for c in ['A', '"', '\n', 'é', '😀', '#'] {
			assert_eq!(key_code(c), None, "{c:?}");
		}
	}

	#[test]
	fn random_key_is_always_a_mapped_code() {
		let mut rng = StdRng::seed_from_u64(11);
		let codes: Vec<u16> = KEYS.iter().map(|(_, code)| *code).collect();
		for _ in 0..500 {
			assert!(codes.contains(&random_key(&mut rng)));
		}
	}

	#[test]
	fn punctuation_set() {
		assert!(is_punctuation('.') && is_punctuation(',') && is_punctuation('?') && is_punctuation('!'));
		assert!(!is_punctuation('-'));
		assert_eq!(supported_chars().filter(|c| is_punctuation(*c)).count(), 4);
	}
}
