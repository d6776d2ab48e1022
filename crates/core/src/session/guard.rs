use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use adbflow_protocol::{SessionPhase, SessionStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::runner::{SessionLoop, SessionStats};
use crate::error::{Error, Result};

/// Result of [`LoopGuard::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
	/// A loop was running and has been told to stop after its current pass.
	Signalled,
	NotRunning,
}

struct ActiveSession {
	generation: u64,
	cancel: CancellationToken,
	handle: Option<JoinHandle<()>>,
	stats: Arc<SessionStats>,
	started_at: DateTime<Utc>,
}

struct GuardShared {
	active: AtomicBool,
	slot: Mutex<Option<ActiveSession>>,
	generation: AtomicU64,
}

/// Owns the single background session.
///
/// At most one loop runs at a time. `start` claims the active flag with a
/// compare-and-set; the flag is released by the loop task itself when it
/// exits, including on panic.
#[derive(Clone)]
pub struct LoopGuard {
	shared: Arc<GuardShared>,
}

impl Default for LoopGuard {
	fn default() -> Self {
		Self::new()
	}
}

impl LoopGuard {
	pub fn new() -> Self {
		Self {
			shared: Arc::new(GuardShared {
				active: AtomicBool::new(false),
				slot: Mutex::new(None),
				generation: AtomicU64::new(0),
			}),
		}
	}

	/// Spawns `session` on the current tokio runtime.
	///
	/// # Errors
	///
	/// [`Error::AlreadyRunning`] if a loop is active, including one that was
	/// asked to stop but has not finished its pass yet.
	pub fn start(&self, session: SessionLoop) -> Result<()> {
		if self
			.shared
			.active
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			debug!(target = "adbflow.guard", "start rejected, loop already active");
			return Err(Error::AlreadyRunning);
		}

		let generation = self.shared.generation.fetch_add(1, Ordering::Relaxed) + 1;
		let cancel = CancellationToken::new();
		let stats = Arc::new(SessionStats::default());
		*self.shared.slot.lock() = Some(ActiveSession {
			generation,
			cancel: cancel.clone(),
			handle: None,
			stats: Arc::clone(&stats),
			started_at: Utc::now(),
		});

		// The slot lock must not be held here: the task may be dropped inside
		// `spawn`, and its release guard locks the slot.
		let release = ReleaseOnExit {
			shared: Arc::clone(&self.shared),
			generation,
		};
		let handle = tokio::spawn(async move {
			let _release = release;
			session.run(cancel, stats).await;
		});

		if let Some(active) = self.shared.slot.lock().as_mut().filter(|active| active.generation == generation) {
			active.handle = Some(handle);
		}
		info!(target = "adbflow.guard", generation, "loop started");
		Ok(())
	}

	/// Signals the running loop, if any. Never fails and may be called any
	/// number of times.
	pub fn stop(&self) -> StopOutcome {
		match self.shared.slot.lock().as_ref() {
			Some(active) => {
				active.cancel.cancel();
				info!(target = "adbflow.guard", generation = active.generation, "stop signalled");
				StopOutcome::Signalled
			}
			None => StopOutcome::NotRunning,
		}
	}

	pub fn is_running(&self) -> bool {
		self.shared.active.load(Ordering::Acquire)
	}

	pub fn status(&self) -> SessionStatus {
		match self.shared.slot.lock().as_ref() {
			Some(active) => SessionStatus {
				phase: if active.cancel.is_cancelled() {
					SessionPhase::StopRequested
				} else {
					SessionPhase::Running
				},
				running: true,
				passes: active.stats.passes(),
				device_failures: active.stats.device_failures(),
				started_at: Some(active.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
			},
			None => SessionStatus {
				phase: SessionPhase::Idle,
				running: false,
				passes: 0,
				device_failures: 0,
				started_at: None,
			},
		}
	}

	/// Signals stop and waits for the loop task to finish.
	pub async fn shutdown(&self) {
		let handle = {
			let mut slot = self.shared.slot.lock();
			slot.as_mut().and_then(|active| {
				active.cancel.cancel();
				active.handle.take()
			})
		};

		if let Some(handle) = handle {
			if let Err(err) = handle.await {
				warn!(target = "adbflow.guard", error = %err, "loop task ended abnormally");
			}
		}
	}
}

/// Clears the session slot when the loop task ends, however it ends.
struct ReleaseOnExit {
	shared: Arc<GuardShared>,
	generation: u64,
}

impl Drop for ReleaseOnExit {
	fn drop(&mut self) {
		let mut slot = self.shared.slot.lock();
		if slot.as_ref().is_some_and(|active| active.generation == self.generation) {
			*slot = None;
		}
		self.shared.active.store(false, Ordering::Release);
		debug!(target = "adbflow.guard", generation = self.generation, "loop released");
	}
}
