use std::sync::Arc;

use adbflow_protocol::{DeviceEntry, LoopStatus, OpenLinkRequest, OpenLinkResponse, SessionStatus, StartRequest};
use tracing::info;

use crate::error::{Error, Result};
use crate::open_link::open_links;
use crate::session::{LoopGuard, SessionDeps, SessionLoop, SessionPlan, StopOutcome};

/// The request surface: device listing, one-shot link opening and control of
/// the background session.
///
/// Cloning is cheap; clones share the same session guard.
#[derive(Clone)]
pub struct Engine {
	deps: SessionDeps,
	links: Arc<Vec<String>>,
	guard: LoopGuard,
}

impl Engine {
	pub fn new(deps: SessionDeps, links: Vec<String>) -> Self {
		Self {
			deps,
			links: Arc::new(links),
			guard: LoopGuard::new(),
		}
	}

	pub fn deps(&self) -> &SessionDeps {
		&self.deps
	}

	pub fn links(&self) -> &[String] {
		&self.links
	}

	pub async fn list_devices(&self) -> Result<Vec<DeviceEntry>> {
		Ok(self.deps.channel.list_devices().await?)
	}

	pub async fn open_links(&self, request: OpenLinkRequest) -> Result<OpenLinkResponse> {
		let results = open_links(
			self.deps.channel.as_ref(),
			&self.deps.audit,
			&request.device_ids,
			&request.links,
		)
		.await?;
		Ok(OpenLinkResponse { results })
	}

	/// Validates `request` and starts the background loop.
	///
	/// Must be called from within a tokio runtime.
	///
	/// # Errors
	///
	/// [`Error::InvalidInput`] for a malformed request or an empty link list,
	/// [`Error::AlreadyRunning`] if a loop is active.
	pub fn start(&self, request: StartRequest) -> Result<LoopStatus> {
		let plan = SessionPlan::from_request(request)?;
		if self.links.is_empty() {
			return Err(Error::invalid_input("No links available"));
		}
		if self.guard.is_running() {
			return Err(Error::AlreadyRunning);
		}

		let devices = plan.devices.len();
		let session = SessionLoop::new(plan, self.links.to_vec(), self.deps.clone())?;
		self.guard.start(session)?;
		info!(target = "adbflow.engine", devices, "endless loop started");
		Ok(LoopStatus::new(true, "Endless loop started"))
	}

	pub fn stop(&self) -> LoopStatus {
		match self.guard.stop() {
			StopOutcome::Signalled => LoopStatus::new(false, "Stop signal sent"),
			StopOutcome::NotRunning => LoopStatus::new(false, "No loop active"),
		}
	}

	pub fn status(&self) -> SessionStatus {
		self.guard.status()
	}

	/// Stops the loop, if any, and waits for it to finish its current pass.
	pub async fn shutdown(&self) {
		self.guard.shutdown().await;
	}
}
