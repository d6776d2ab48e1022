//! Preparing generated text for key-by-key typing.

/// Default chunk length, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Flattens newlines to spaces, drops quotes, backslashes and non-ASCII
/// characters, and trims the result.
pub fn sanitize(input: &str) -> String {
	let cleaned: String = input
		.chars()
		.filter_map(|c| match c {
			'\n' | '\r' => Some(' '),
			'"' | '\\' => None,
			c if c.is_ascii() => Some(c),
			_ => None,
		})
		.collect();
	cleaned.trim().to_string()
}

/// Splits `text` into pieces of at most `size` characters. A `size` of zero
/// keeps the text whole.
pub fn chunk(text: &str, size: usize) -> Vec<String> {
	if text.is_empty() {
		return Vec::new();
	}
	if size == 0 {
		return vec![text.to_string()];
	}
	let chars: Vec<char> = text.chars().collect();
	chars.chunks(size).map(|c| c.iter().collect()).collect()
}

pub fn sanitize_and_chunk(input: &str, size: usize) -> Vec<String> {
	chunk(&sanitize(input), size)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sanitize_flattens_and_strips() {
		assert_eq!(sanitize("  \"Hai\" kamu,\r\napa kabar?\\ "), "Hai kamu,  apa kabar?");
		assert_eq!(sanitize("café ☕ time"), "caf  time");
		assert_eq!(sanitize("\n\n"), "");
	}

	#[test]
	fn chunk_splits_on_size() {
		let text = "a".repeat(250);
		let chunks = chunk(&text, DEFAULT_CHUNK_SIZE);
		assert_eq!(chunks.iter().map(String::len).collect::<Vec<_>>(), vec![100, 100, 50]);
		assert_eq!(chunks.concat(), text);
	}

	#[test]
	fn empty_text_has_no_chunks() {
		assert!(sanitize_and_chunk("", 100).is_empty());
		assert!(sanitize_and_chunk("  \n ", 100).is_empty());
	}

	#[test]
	fn zero_size_keeps_text_whole() {
		assert_eq!(chunk("hello", 0), vec!["hello"]);
	}
}
