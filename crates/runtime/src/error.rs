//! Error types for the device command channel.

use thiserror::Error;

/// Result type alias for channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to devices.
#[derive(Debug, Error)]
pub enum Error {
	/// No usable `adb` executable was found.
	#[error("adb executable not found. Install Android platform-tools or set ADBFLOW_ADB")]
	AdbNotFound,

	/// The transport itself failed (adb could not be spawned, server down).
	#[error("Transport error: {0}")]
	Transport(String),

	/// The device did not answer: offline, unauthorized, unknown or timed out.
	#[error("Device {device} unreachable: {reason}")]
	DeviceUnreachable { device: String, reason: String },

	/// The device answered but the instruction failed.
	#[error("Command `{instruction}` failed on {device}{}: {stderr}", code.map(|c| format!(" (exit {c})")).unwrap_or_default())]
	CommandFailed {
		device: String,
		instruction: String,
		code: Option<i32>,
		stderr: String,
	},

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Returns the device this error is about, if any.
	pub fn device(&self) -> Option<&str> {
		match self {
			Error::DeviceUnreachable { device, .. } | Error::CommandFailed { device, .. } => {
				Some(device)
			}
			_ => None,
		}
	}

	/// Returns true if the device could not be reached at all.
	pub fn is_unreachable(&self) -> bool {
		matches!(self, Error::DeviceUnreachable { .. })
	}
}
