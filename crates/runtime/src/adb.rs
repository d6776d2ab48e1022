//! [`DeviceChannel`] backed by the `adb` executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use adbflow_protocol::DeviceEntry;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::audit::AuditLog;
use crate::channel::DeviceChannel;
use crate::driver::find_adb;
use crate::error::{Error, Result};

/// Default per-command timeout.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// stderr fragments that mean the device never received the instruction.
const UNREACHABLE_MARKERS: [&str; 6] = [
	"not found",
	"offline",
	"unauthorized",
	"no devices",
	"cannot connect",
	"failed to connect",
];

/// Runs `adb -s <device> shell <instruction>` for every command.
///
/// Each call spawns its own process, so devices never wait on each other.
/// Every call is written to the [`AuditLog`] with its outcome.
#[derive(Debug, Clone)]
pub struct AdbChannel {
	program: PathBuf,
	base_args: Vec<OsString>,
	timeout: Duration,
	audit: AuditLog,
}

impl AdbChannel {
	pub fn new(program: impl Into<PathBuf>, audit: AuditLog) -> Self {
		Self {
			program: program.into(),
			base_args: Vec::new(),
			timeout: DEFAULT_COMMAND_TIMEOUT,
			audit,
		}
	}

	/// Resolves the adb executable with [`find_adb`] and builds a channel for it.
	pub fn locate(explicit: Option<&Path>, audit: AuditLog) -> Result<Self> {
		Ok(Self::new(find_adb(explicit)?, audit))
	}

	/// Arguments placed before every command, e.g. `-H host -P port` for a
	/// remote adb server.
	pub fn with_base_args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<OsString>,
	{
		self.base_args = args.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn program(&self) -> &Path {
		&self.program
	}

	fn command_line(&self, device: &str, instruction: &str) -> String {
		format!("adb -s {device} shell {instruction}")
	}

	async fn run(&self, args: &[&str]) -> std::io::Result<Option<Output>> {
		let mut cmd = Command::new(&self.program);
		cmd.args(&self.base_args)
			.args(args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true);

		match tokio::time::timeout(self.timeout, cmd.output()).await {
			Ok(output) => output.map(Some),
			Err(_) => Ok(None),
		}
	}
}

#[async_trait]
impl DeviceChannel for AdbChannel {
	async fn execute(&self, device: &str, instruction: &str) -> Result<String> {
		let line = self.command_line(device, instruction);
		debug!(target = "adbflow.adb", device, instruction, "executing");

		let output = match self.run(&["-s", device, "shell", instruction]).await {
			Ok(Some(output)) => output,
			Ok(None) => {
				let err = Error::DeviceUnreachable {
					device: device.to_string(),
					reason: format!("no answer within {}ms", self.timeout.as_millis()),
				};
				self.audit.record(format!("Error: {line}: {err}"));
				return Err(err);
			}
			Err(err) => {
				let err = Error::Transport(format!("failed to spawn {}: {err}", self.program.display()));
				self.audit.record(format!("Error: {line}: {err}"));
				return Err(err);
			}
		};

		match classify(device, instruction, output) {
			Ok(stdout) => {
				self.audit.record(format!("Command executed: {line}"));
				Ok(stdout)
			}
			Err(err) => {
				warn!(target = "adbflow.adb", device, instruction, error = %err, "command failed");
				self.audit.record(format!("Error: {line}: {err}"));
				Err(err)
			}
		}
	}

	async fn list_devices(&self) -> Result<Vec<DeviceEntry>> {
		let output = match self.run(&["devices"]).await {
			Ok(Some(output)) => output,
			Ok(None) => {
				let err = Error::Transport("adb devices timed out".to_string());
				self.audit.record(format!("Error listing devices: {err}"));
				return Err(err);
			}
			Err(err) => {
				let err = Error::Transport(format!("failed to spawn {}: {err}", self.program.display()));
				self.audit.record(format!("Error listing devices: {err}"));
				return Err(err);
			}
		};

		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
			let err = Error::Transport(format!("adb devices failed: {stderr}"));
			self.audit.record(format!("Error listing devices: {err}"));
			return Err(err);
		}

		Ok(parse_device_list(&String::from_utf8_lossy(&output.stdout)))
	}
}

fn classify(device: &str, instruction: &str, output: Output) -> Result<String> {
	let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
	if output.status.success() {
		return Ok(stdout);
	}

	let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
	let lowered = stderr.to_ascii_lowercase();
	if UNREACHABLE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
		return Err(Error::DeviceUnreachable {
			device: device.to_string(),
			reason: stderr,
		});
	}

	Err(Error::CommandFailed {
		device: device.to_string(),
		instruction: instruction.to_string(),
		code: output.status.code(),
		stderr,
	})
}

/// Parses `adb devices` output.
///
/// The first line is the `List of devices attached` header; blank lines and
/// daemon notices (`* daemon started successfully`) are skipped.
pub fn parse_device_list(stdout: &str) -> Vec<DeviceEntry> {
	stdout
		.lines()
		.skip(1)
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('*'))
		.map(|line| {
			let mut parts = line.split_whitespace();
			let id = parts.next().unwrap_or_default();
			let status = parts.next().unwrap_or_default();
			DeviceEntry::new(id, status)
		})
		.collect()
}

#[cfg(test)]
mod tests;
