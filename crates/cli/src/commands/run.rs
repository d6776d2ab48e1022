//! Foreground session: start the loop, wait for Ctrl-C, stop after the
//! current pass.

use adbflow_protocol::{DeviceSelection, StartRequest};
use tracing::info;

use crate::cli::RunArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::runtime::build_engine;

pub async fn execute(config: &AppConfig, args: RunArgs) -> Result<()> {
	let engine = build_engine(config)?;
	let request = StartRequest {
		rest_minutes: Some(args.rest_minutes),
		device_id: DeviceSelection::Many(args.devices),
		topic: Some(args.topic),
		language: Some(args.language),
		mode: args.mode.into(),
	};

	let started = engine.start(request)?;
	eprintln!("{}; press Ctrl-C to stop after the current pass", started.message);

	tokio::signal::ctrl_c().await?;

	let status = engine.status();
	let stopping = engine.stop();
	eprintln!("{}", stopping.message);
	engine.shutdown().await;

	info!(
		target = "adbflow.cli",
		passes = status.passes,
		device_failures = status.device_failures,
		"session ended"
	);
	Ok(())
}
