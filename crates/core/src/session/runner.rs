use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use adbflow_protocol::{PostSendMode, StartRequest};
use adbflow_runtime::{AuditLog, DeviceChannel};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command;
use crate::device_id::DeviceId;
use crate::error::{Error, Result};
use crate::generator::TextGenerator;
use crate::gesture::IdleGesture;
use crate::keymap::{KEYCODE_ENTER, KEYCODE_HOME};
use crate::pacing::{DelayRange, Pacer};
use crate::rotator::ContentRotator;
use crate::script::{ScriptLibrary, run_script};
use crate::text::{self, DEFAULT_CHUNK_SIZE};
use crate::typing::{TypingProfile, TypingSimulator};

/// A validated start request.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
	pub devices: Vec<DeviceId>,
	pub topic: String,
	pub language: String,
	/// Wait between passes.
	pub rest: Duration,
	pub mode: PostSendMode,
}

impl SessionPlan {
	/// Validates a start request.
	///
	/// # Errors
	///
	/// [`Error::InvalidInput`] when topic or language is blank, when no device
	/// id has a valid address, or when the rest interval is negative or not a
	/// number.
	pub fn from_request(request: StartRequest) -> Result<Self> {
		let topic = request.topic.as_deref().map(str::trim).unwrap_or_default();
		let language = request.language.as_deref().map(str::trim).unwrap_or_default();
		if topic.is_empty() || language.is_empty() {
			return Err(Error::invalid_input("Missing topic or language"));
		}

		let devices = DeviceId::normalize(request.device_id.into_vec());
		if devices.is_empty() {
			return Err(Error::invalid_input("No valid device IDs"));
		}

		let minutes = request.rest_minutes.unwrap_or(0.0);
		if !minutes.is_finite() || minutes < 0.0 {
			return Err(Error::invalid_input("restMinutes must be a non-negative number"));
		}
		let rest = Duration::try_from_secs_f64(minutes * 60.0)
			.map_err(|_| Error::invalid_input("restMinutes is out of range"))?;

		Ok(Self {
			devices,
			topic: topic.to_string(),
			language: language.to_string(),
			rest,
			mode: request.mode,
		})
	}
}

/// Waits around the message itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionTiming {
	/// After opening a link, before the idle gesture.
	pub settle: DelayRange,
	/// After typing, before the final Enter.
	pub pre_send: DelayRange,
	/// Maximum characters typed per chunk. Zero types the whole text at once.
	pub chunk_size: usize,
}

impl Default for SessionTiming {
	fn default() -> Self {
		Self {
			settle: DelayRange::new(1500, 4000),
			pre_send: DelayRange::new(1000, 4000),
			chunk_size: DEFAULT_CHUNK_SIZE,
		}
	}
}

impl SessionTiming {
	pub fn instant() -> Self {
		Self {
			settle: DelayRange::ZERO,
			pre_send: DelayRange::ZERO,
			chunk_size: DEFAULT_CHUNK_SIZE,
		}
	}
}

/// Everything a session needs from the outside world.
#[derive(Clone)]
pub struct SessionDeps {
	pub channel: Arc<dyn DeviceChannel>,
	pub generator: Arc<dyn TextGenerator>,
	pub pacer: Arc<dyn Pacer>,
	pub scripts: Arc<ScriptLibrary>,
	pub audit: AuditLog,
	pub typing: TypingProfile,
	pub timing: SessionTiming,
}

/// Counters shared between a running loop and status readers.
#[derive(Debug, Default)]
pub struct SessionStats {
	passes: AtomicU64,
	device_failures: AtomicU64,
}

impl SessionStats {
	pub fn passes(&self) -> u64 {
		self.passes.load(Ordering::Relaxed)
	}

	pub fn device_failures(&self) -> u64 {
		self.device_failures.load(Ordering::Relaxed)
	}

	fn record(&self, report: &PassReport) {
		self.passes.fetch_add(1, Ordering::Relaxed);
		self.device_failures.fetch_add(report.failures as u64, Ordering::Relaxed);
	}
}

/// Outcome of one pass over all devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
	pub devices: usize,
	pub failures: usize,
}

/// The endless loop: one pass over every device, rest, repeat until cancelled.
pub struct SessionLoop {
	plan: SessionPlan,
	rotator: ContentRotator,
	deps: SessionDeps,
	rng: StdRng,
}

impl SessionLoop {
	/// Shuffles `links` once and prepares the loop.
	///
	/// # Errors
	///
	/// [`Error::InvalidInput`] when `links` is empty.
	pub fn new(plan: SessionPlan, links: Vec<String>, deps: SessionDeps) -> Result<Self> {
		let mut rng = StdRng::from_entropy();
		let rotator = ContentRotator::shuffled(links, &mut rng)?;
		Ok(Self::with_rng(plan, rotator, deps, rng))
	}

	/// Uses a caller-provided rotator and RNG, for reproducible runs.
	pub fn with_rng(plan: SessionPlan, rotator: ContentRotator, deps: SessionDeps, rng: StdRng) -> Self {
		Self {
			plan,
			rotator,
			deps,
			rng,
		}
	}

	pub fn plan(&self) -> &SessionPlan {
		&self.plan
	}

	/// Runs passes until `cancel` fires.
	///
	/// Cancellation is observed between passes; a pass in progress always
	/// finishes. The rest between passes ends early on cancellation.
	pub async fn run(mut self, cancel: CancellationToken, stats: Arc<SessionStats>) {
		info!(
			target = "adbflow.session",
			devices = self.plan.devices.len(),
			links = self.rotator.len(),
			mode = self.plan.mode.as_str(),
			rest_secs = self.plan.rest.as_secs_f64(),
			"session started"
		);

		loop {
			let report = self.run_pass().await;
			stats.record(&report);
			debug!(
				target = "adbflow.session",
				pass = stats.passes(),
				failures = report.failures,
				"pass finished"
			);

			tokio::select! {
				_ = cancel.cancelled() => {}
				_ = self.deps.pacer.pause(self.plan.rest) => {}
			}
			if cancel.is_cancelled() {
				break;
			}
			tokio::task::yield_now().await;
		}

		info!(target = "adbflow.session", passes = stats.passes(), "session stopped");
		self.deps.audit.record("🛑 Endless loop stopped");
	}

	/// Drives every device once, in registration order. A failing device is
	/// audited and skipped; the pass never fails as a whole.
	pub async fn run_pass(&mut self) -> PassReport {
		let devices = self.plan.devices.clone();
		let mut report = PassReport {
			devices: devices.len(),
			failures: 0,
		};

		for device in &devices {
			if let Err(err) = self.drive_device(device.as_str()).await {
				warn!(target = "adbflow.session", device = %device, error = %err, "device step failed");
				self.deps.audit.record(format!("❌ {device} error: {err}"));
				report.failures += 1;
			}
		}
		report
	}

	async fn drive_device(&mut self, device: &str) -> Result<()> {
		let link = self.rotator.next();
		self.deps.audit.record(format!("▶ {device} → {link}"));

		self.execute(device, &command::open_url(&link)).await?;
		self.pause(self.deps.timing.settle).await;

		let gesture = IdleGesture::random(&mut self.rng);
		self.execute(device, &gesture.instruction()).await?;

		let generated = self.deps.generator.generate(&self.plan.language, &self.plan.topic).await;
		let chunks = text::sanitize_and_chunk(&generated, self.deps.timing.chunk_size);
		if chunks.is_empty() {
			debug!(target = "adbflow.session", device, "no text to type");
		}
		self.type_chunks(device, &chunks).await?;

		self.pause(self.deps.timing.pre_send).await;
		self.execute(device, &command::keyevent(KEYCODE_ENTER)).await?;

		match self.plan.mode {
			PostSendMode::None => {}
			PostSendMode::Reply => {
				let name = self.deps.scripts.reply_name().to_string();
				self.run_named_script(device, &name).await?;
				self.type_chunks(device, &chunks).await?;
				self.execute(device, &command::keyevent(KEYCODE_ENTER)).await?;
				self.execute(device, &command::keyevent(KEYCODE_HOME)).await?;
			}
			PostSendMode::Image => {
				let name = self.deps.scripts.image_name().to_string();
				self.run_named_script(device, &name).await?;
				self.execute(device, &command::keyevent(KEYCODE_HOME)).await?;
			}
		}
		Ok(())
	}

	async fn type_chunks(&mut self, device: &str, chunks: &[String]) -> Result<()> {
		let typist = TypingSimulator::new(self.deps.channel.as_ref(), self.deps.pacer.as_ref(), &self.deps.typing);
		for chunk in chunks {
			typist.type_text(device, chunk, &mut self.rng).await?;
		}
		Ok(())
	}

	async fn run_named_script(&self, device: &str, name: &str) -> Result<()> {
		let lines = self.deps.scripts.load(name).await?;
		run_script(self.deps.channel.as_ref(), &self.deps.audit, device, &lines).await;
		Ok(())
	}

	async fn execute(&self, device: &str, instruction: &str) -> Result<()> {
		self.deps.channel.execute(device, instruction).await?;
		Ok(())
	}

	async fn pause(&mut self, range: DelayRange) {
		let duration = range.sample(&mut self.rng);
		self.deps.pacer.pause(duration).await;
	}
}
