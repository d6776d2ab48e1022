//! Scripted command files.
//!
//! A script is a plain text file with one device instruction per line. The
//! session runs the reply script or the image script after sending a message,
//! depending on the post-send mode.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use adbflow_runtime::{AuditLog, DeviceChannel};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const DEFAULT_REPLY_SCRIPT: &str = "example1.txt";
pub const DEFAULT_IMAGE_SCRIPT: &str = "example2.txt";

#[derive(Debug, Clone)]
enum Source {
	Directory(PathBuf),
	Inline(HashMap<String, String>),
}

/// Named scripts, read from a directory on every use.
///
/// Files are re-read each time so operators can edit them while a session is
/// running.
#[derive(Debug, Clone)]
pub struct ScriptLibrary {
	source: Source,
	reply: String,
	image: String,
}

impl ScriptLibrary {
	pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
		Self {
			source: Source::Directory(dir.into()),
			reply: DEFAULT_REPLY_SCRIPT.to_string(),
			image: DEFAULT_IMAGE_SCRIPT.to_string(),
		}
	}

	/// Scripts held in memory, keyed by file name.
	pub fn inline<I, K, V>(scripts: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			source: Source::Inline(scripts.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
			reply: DEFAULT_REPLY_SCRIPT.to_string(),
			image: DEFAULT_IMAGE_SCRIPT.to_string(),
		}
	}

	pub fn with_names(mut self, reply: impl Into<String>, image: impl Into<String>) -> Self {
		self.reply = reply.into();
		self.image = image.into();
		self
	}

	pub fn reply_name(&self) -> &str {
		&self.reply
	}

	pub fn image_name(&self) -> &str {
		&self.image
	}

	pub fn dir(&self) -> Option<&Path> {
		match &self.source {
			Source::Directory(dir) => Some(dir),
			Source::Inline(_) => None,
		}
	}

	/// Loads the instructions of script `name`.
	///
	/// # Errors
	///
	/// [`Error::ScriptMissing`] when the file (or inline entry) does not exist.
	pub async fn load(&self, name: &str) -> Result<Vec<String>> {
		let contents = match &self.source {
			Source::Directory(dir) => {
				let path = dir.join(name);
				match tokio::fs::read_to_string(&path).await {
					Ok(contents) => contents,
					Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
						return Err(Error::ScriptMissing {
							name: name.to_string(),
							path: Some(path),
						});
					}
					Err(err) => return Err(err.into()),
				}
			}
			Source::Inline(scripts) => scripts.get(name).cloned().ok_or_else(|| Error::ScriptMissing {
				name: name.to_string(),
				path: None,
			})?,
		};
		Ok(parse_script(&contents))
	}
}

/// Splits script text into instructions, dropping blank lines.
pub fn parse_script(contents: &str) -> Vec<String> {
	contents
		.lines()
		.map(|line| line.trim_end_matches('\r').trim())
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect()
}

/// Outcome of running a script on one device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
	pub succeeded: usize,
	pub failed: usize,
}

/// Runs `lines` on `device` in order. A failing line is audited and the
/// script continues with the next one.
pub async fn run_script(channel: &dyn DeviceChannel, audit: &AuditLog, device: &str, lines: &[String]) -> ScriptReport {
	let mut report = ScriptReport::default();
	for line in lines {
		match channel.execute(device, line).await {
			Ok(_) => report.succeeded += 1,
			Err(err) => {
				warn!(target = "adbflow.script", device, instruction = %line, error = %err, "script line failed");
				audit.record(format!("Error on {device} running `{line}`: {err}"));
				report.failed += 1;
			}
		}
	}
	debug!(target = "adbflow.script", device, succeeded = report.succeeded, failed = report.failed, "script finished");
	report
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;
	use crate::testing::MockChannel;

	#[test]
	fn parse_skips_blank_lines_and_carriage_returns() {
		let lines = parse_script("input tap 1 2\r\n\r\n   \ninput keyevent 4\n");
		assert_eq!(lines, vec!["input tap 1 2", "input keyevent 4"]);
	}

	#[tokio::test]
	async fn loads_from_directory() {
		let dir = TempDir::new().unwrap();
		std::fs::write(dir.path().join("example1.txt"), "input tap 10 20\ninput keyevent 66\n").unwrap();

		let library = ScriptLibrary::from_dir(dir.path());
		let lines = library.load(library.reply_name()).await.unwrap();
		assert_eq!(lines, vec!["input tap 10 20", "input keyevent 66"]);
	}

	#[tokio::test]
	async fn missing_file_is_reported_by_name() {
		let dir = TempDir::new().unwrap();
		let library = ScriptLibrary::from_dir(dir.path());

		let err = library.load("example2.txt").await.unwrap_err();
		assert!(matches!(&err, Error::ScriptMissing { name, path: Some(_) } if name == "example2.txt"));
		assert_eq!(err.to_string(), "Command file example2.txt does not exist");
	}

	#[tokio::test]
	async fn custom_names_and_inline_scripts() {
		let library = ScriptLibrary::inline([("r.txt", "input tap 1 1")]).with_names("r.txt", "i.txt");
		assert_eq!(library.load(library.reply_name()).await.unwrap(), vec!["input tap 1 1"]);
		assert!(library.load(library.image_name()).await.is_err());
		assert!(library.dir().is_none());
	}

	#[tokio::test]
	async fn failing_line_does_not_stop_the_script() {
		let channel = MockChannel::new();
		channel.fail_instruction("input tap 2 2");
		let audit = AuditLog::memory();
		let lines: Vec<String> = ["input tap 1 1", "input tap 2 2", "input tap 3 3"].map(String::from).to_vec();

		let report = run_script(&channel, &audit, "10.0.0.1:5555", &lines).await;

		assert_eq!(report, ScriptReport { succeeded: 2, failed: 1 });
		assert_eq!(channel.instructions_for("10.0.0.1:5555").len(), 3);
		assert_eq!(audit.entries().len(), 1);
	}
}
