//! Test doubles for the engine's collaborators.
//!
//! Everything here runs in memory: [`MockChannel`] records instructions instead
//! of talking to devices, [`InstantPacer`] records waits instead of sleeping,
//! and [`FixedGenerator`] returns canned text.
//!
//! # Example
//!
//! ```ignore
//! use adbflow::testing::{MockChannel, InstantPacer};
//!
//! let channel = MockChannel::new();
//! channel.fail_device("10.0.0.9:5555");
//! // ... run the session against `channel`
//! assert!(channel.instructions_for("10.0.0.1:5555").len() > 0);
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use adbflow_protocol::DeviceEntry;
use adbflow_runtime::{AuditLog, DeviceChannel, Error as ChannelError, Result as ChannelResult};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::generator::TextGenerator;
use crate::pacing::Pacer;
use crate::script::ScriptLibrary;
use crate::session::{SessionDeps, SessionTiming};
use crate::typing::TypingProfile;

/// One instruction sent through a [`MockChannel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCommand {
	pub device: String,
	pub instruction: String,
}

/// In-memory [`DeviceChannel`].
///
/// Records every call, including failed ones, in call order.
#[derive(Default)]
pub struct MockChannel {
	sent: Mutex<Vec<SentCommand>>,
	failing_devices: Mutex<HashSet<String>>,
	failing_instructions: Mutex<HashSet<String>>,
	fail_all: Mutex<bool>,
	devices: Mutex<Option<Vec<DeviceEntry>>>,
}

impl MockChannel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every command to `device` fails as unreachable.
	pub fn fail_device(&self, device: &str) {
		self.failing_devices.lock().insert(device.to_string());
	}

	/// Every command equal to `instruction` fails, on any device.
	pub fn fail_instruction(&self, instruction: &str) {
		self.failing_instructions.lock().insert(instruction.to_string());
	}

	/// Every command and the device listing fail.
	pub fn fail_everything(&self) {
		*self.fail_all.lock() = true;
	}

	pub fn set_devices(&self, devices: Vec<DeviceEntry>) {
		*self.devices.lock() = Some(devices);
	}

	pub fn sent(&self) -> Vec<SentCommand> {
		self.sent.lock().clone()
	}

	pub fn instructions_for(&self, device: &str) -> Vec<String> {
		self.sent
			.lock()
			.iter()
			.filter(|c| c.device == device)
			.map(|c| c.instruction.clone())
			.collect()
	}

	pub fn clear(&self) {
		self.sent.lock().clear();
	}
}

#[async_trait]
impl DeviceChannel for MockChannel {
	async fn execute(&self, device: &str, instruction: &str) -> ChannelResult<String> {
		self.sent.lock().push(SentCommand {
			device: device.to_string(),
			instruction: instruction.to_string(),
		});

		if *self.fail_all.lock() || self.failing_devices.lock().contains(device) {
			return Err(ChannelError::DeviceUnreachable {
				device: device.to_string(),
				reason: "mock device offline".to_string(),
			});
		}
		if self.failing_instructions.lock().contains(instruction) {
			return Err(ChannelError::CommandFailed {
				device: device.to_string(),
				instruction: instruction.to_string(),
				code: Some(1),
				stderr: "mock failure".to_string(),
			});
		}
		Ok(String::new())
	}

	async fn list_devices(&self) -> ChannelResult<Vec<DeviceEntry>> {
		if *self.fail_all.lock() {
			return Err(ChannelError::Transport("mock transport down".to_string()));
		}
		Ok(self.devices.lock().clone().unwrap_or_default())
	}
}

/// [`Pacer`] that returns immediately and remembers every requested wait.
#[derive(Default)]
pub struct InstantPacer {
	pauses: Mutex<Vec<Duration>>,
}

impl InstantPacer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn pauses(&self) -> Vec<Duration> {
		self.pauses.lock().clone()
	}

	pub fn total(&self) -> Duration {
		self.pauses.lock().iter().sum()
	}
}

#[async_trait]
impl Pacer for InstantPacer {
	async fn pause(&self, duration: Duration) {
		self.pauses.lock().push(duration);
	}
}

/// [`TextGenerator`] that always returns the same text.
pub struct FixedGenerator {
	text: String,
	requests: Mutex<Vec<(String, String)>>,
}

impl FixedGenerator {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			requests: Mutex::new(Vec::new()),
		}
	}

	/// `(language, topic)` pairs requested so far.
	pub fn requests(&self) -> Vec<(String, String)> {
		self.requests.lock().clone()
	}
}

#[async_trait]
impl TextGenerator for FixedGenerator {
	async fn generate(&self, language: &str, topic: &str) -> String {
		self.requests.lock().push((language.to_string(), topic.to_string()));
		self.text.clone()
	}
}

/// Dependencies with no waits, no typos and an in-memory audit log.
pub fn instant_deps(
	channel: Arc<MockChannel>,
	generator: Arc<dyn TextGenerator>,
	scripts: ScriptLibrary,
) -> SessionDeps {
	SessionDeps {
		channel,
		generator,
		pacer: Arc::new(InstantPacer::new()),
		scripts: Arc::new(scripts),
		audit: AuditLog::memory(),
		typing: TypingProfile::instant(),
		timing: SessionTiming::instant(),
	}
}
