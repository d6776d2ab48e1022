//! Error types for the session engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// A request field was missing or malformed. The loop is never started.
	#[error("{0}")]
	InvalidInput(String),

	/// A start request arrived while a loop is active.
	#[error("Loop already active")]
	AlreadyRunning,

	/// A device command failed.
	#[error(transparent)]
	Device(#[from] adbflow_runtime::Error),

	/// A scripted command file is not available.
	#[error("Command file {name} does not exist")]
	ScriptMissing { name: String, path: Option<PathBuf> },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	pub fn invalid_input(message: impl Into<String>) -> Self {
		Error::InvalidInput(message.into())
	}

	/// Returns true for errors caused by the caller's request.
	pub fn is_invalid_input(&self) -> bool {
		matches!(self, Error::InvalidInput(_))
	}
}
