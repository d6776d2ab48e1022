//! Result envelope for one-shot CLI commands.
//!
//! JSON output wraps command data in a stable envelope:
//!
//! ```json
//! {
//!   "ok": true,
//!   "command": "devices",
//!   "data": [{ "id": "192.168.1.10:5555", "status": "device" }],
//!   "timings": { "durationMs": 42 }
//! }
//! ```
//!
//! On failure `data` is replaced by `error: { code, message }`.


use std::io::{self, Write};
use std::time::Instant;

use adbflow_protocol::{DeviceEntry, OpenLinkResponse};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Pretty-printed JSON envelope
	#[default]
	Json,
	/// Human-readable lines
	Text,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Json => write!(f, "json"),
			OutputFormat::Text => write!(f, "text"),
		}
	}
}

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	InvalidInput,
	AlreadyRunning,
	AdbNotFound,
	DeviceUnreachable,
	CommandFailed,
	Transport,
	ScriptMissing,
	Config,
	Io,
	Internal,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let code = serde_json::to_value(self)
			.ok()
			.and_then(|v| v.as_str().map(str::to_string))
			.unwrap_or_else(|| format!("{self:?}"));
		f.write_str(&code)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

/// Builds a [`CommandResult`], measuring time from construction.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	started: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			started: Instant::now(),
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			ok: self.error.is_none(),
			command: self.command,
			data: self.data,
			error: self.error,
			timings: Some(Timings {
				duration_ms: self.started.elapsed().as_millis() as u64,
			}),
		}
	}
}

/// Line-oriented rendering for [`OutputFormat::Text`].
pub trait TextOutput {
	fn text_lines(&self) -> Vec<String>;
}

impl TextOutput for Vec<DeviceEntry> {
	fn text_lines(&self) -> Vec<String> {
		if self.is_empty() {
			return vec!["no devices attached".to_string()];
		}
		self.iter().map(|d| format!("{}\t{}", d.id, d.status)).collect()
	}
}

impl TextOutput for OpenLinkResponse {
	fn text_lines(&self) -> Vec<String> {
		self.results
			.iter()
			.map(|r| match &r.error {
				None => format!("ok    {} -> {}", r.device_id, r.link),
				Some(err) => format!("fail  {} -> {}: {err}", r.device_id, r.link),
			})
			.collect()
	}
}

impl TextOutput for () {
	fn text_lines(&self) -> Vec<String> {
		Vec::new()
	}
}

pub fn print_result<T: Serialize + TextOutput>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => print_result_text(result),
	}
}

fn print_result_text<T: Serialize + TextOutput>(result: &CommandResult<T>) {
	let mut stdout = io::stdout().lock();
	if let Some(data) = &result.data {
		for line in data.text_lines() {
			let _ = writeln!(stdout, "{line}");
		}
	}
	if let Some(error) = &result.error {
		let _ = writeln!(stdout, "Error [{}]: {}", error.code, error.message);
	}
}

pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}
