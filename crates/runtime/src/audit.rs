//! Append-only audit log.
//!
//! Every device command and major loop event is written as one
//! `[timestamp] message` line. The log is purely for operators; nothing reads
//! it back.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use tracing::warn;

use crate::error::Result;

enum Sink {
	File { path: PathBuf, file: Mutex<File> },
	Memory(Mutex<Vec<String>>),
	Disabled,
}

/// Shared handle to the audit log. Cloning is cheap; all clones append to the
/// same sink.
#[derive(Clone)]
pub struct AuditLog {
	sink: Arc<Sink>,
}

impl std::fmt::Debug for AuditLog {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let kind = match self.sink.as_ref() {
			Sink::File { path, .. } => format!("file({})", path.display()),
			Sink::Memory(_) => "memory".to_string(),
			Sink::Disabled => "disabled".to_string(),
		};
		f.debug_struct("AuditLog").field("sink", &kind).finish()
	}
}

impl AuditLog {
	/// Opens (or creates) the log file at `path` in append mode.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		if let Some(parent) = path.parent() {
			if !parent.as_os_str().is_empty() && !parent.exists() {
				fs::create_dir_all(parent)?;
			}
		}
		let file = OpenOptions::new().create(true).append(true).open(&path)?;
		Ok(Self {
			sink: Arc::new(Sink::File {
				path,
				file: Mutex::new(file),
			}),
		})
	}

	/// Keeps entries in memory; used by tests and dry runs.
	pub fn memory() -> Self {
		Self {
			sink: Arc::new(Sink::Memory(Mutex::new(Vec::new()))),
		}
	}

	/// Drops every entry.
	pub fn disabled() -> Self {
		Self {
			sink: Arc::new(Sink::Disabled),
		}
	}

	pub fn path(&self) -> Option<&Path> {
		match self.sink.as_ref() {
			Sink::File { path, .. } => Some(path),
			_ => None,
		}
	}

	/// Appends one timestamped entry.
	///
	/// Write failures are reported through tracing and otherwise ignored; losing
	/// an audit line must never fail a device command.
	pub fn record(&self, message: impl AsRef<str>) {
		let line = format!("[{}] {}", timestamp(), message.as_ref());
		match self.sink.as_ref() {
			Sink::File { path, file } => {
				let mut file = file.lock();
				if let Err(err) = writeln!(file, "{line}") {
					warn!(target = "adbflow.audit", path = %path.display(), error = %err, "failed to append audit entry");
				}
			}
			Sink::Memory(entries) => entries.lock().push(line),
			Sink::Disabled => {}
		}
	}

	/// Returns the recorded entries of an in-memory log, oldest first.
	pub fn entries(&self) -> Vec<String> {
		match self.sink.as_ref() {
			Sink::Memory(entries) => entries.lock().clone(),
			_ => Vec::new(),
		}
	}
}

fn timestamp() -> String {
	Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
