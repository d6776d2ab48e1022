use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;

/// Reads the links file: one link per line, trimmed, blanks skipped.
///
/// A missing file yields an empty list; the engine then rejects start
/// requests with "No links available" instead of refusing to boot.
pub fn load_links(path: impl AsRef<Path>) -> Result<Vec<String>> {
	let path = path.as_ref();
	let contents = match std::fs::read_to_string(path) {
		Ok(contents) => contents,
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
			warn!(target = "adbflow.content", path = %path.display(), "links file not found");
			return Ok(Vec::new());
		}
		Err(err) => return Err(err.into()),
	};

	let links = parse_links(&contents);
	info!(target = "adbflow.content", path = %path.display(), count = links.len(), "loaded links");
	Ok(links)
}

pub fn parse_links(contents: &str) -> Vec<String> {
	contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn trims_and_skips_blank_lines() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("links.txt");
		std::fs::write(&path, "  https://chat.whatsapp.com/a  \n\n\r\nhttps://chat.whatsapp.com/b\r\n").unwrap();

		let links = load_links(&path).unwrap();
		assert_eq!(links, vec!["https://chat.whatsapp.com/a", "https://chat.whatsapp.com/b"]);
	}

	#[test]
	fn missing_file_is_empty() {
		let dir = TempDir::new().unwrap();
		assert!(load_links(dir.path().join("nope.txt")).unwrap().is_empty());
	}
}
